use thiserror::Error;

use crate::traits::{ChannelError, StorageError};

#[derive(Debug, Error)]
pub enum PaymentFlowError {
    #[error("The payment could not be stored. {0}")]
    Storage(#[from] StorageError),
    /// The payment row is committed but the settlement request was not published. The row stays `Pending`
    /// until a reconciliation sweep picks it up.
    #[error("The settlement request for payment {payment_id} could not be published. {source}")]
    Transport {
        payment_id: i64,
        source: ChannelError,
    },
}

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("The message body is not a valid settlement request. {0}")]
    MalformedMessage(String),
    #[error("The settlement outcome could not be stored. {0}")]
    Storage(#[from] StorageError),
}
