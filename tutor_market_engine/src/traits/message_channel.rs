use thiserror::Error;

use crate::db_types::SettlementRequest;

/// The at-least-once delivery queue that decouples payment creation from settlement.
///
/// Implementations must only report success once the message has been accepted by the transport. The payment
/// row is committed before `publish` is called; if `publish` fails, the row stays `Pending` and is not rolled
/// back (see the settlement workflow notes in [`crate::PaymentFlowApi`]).
#[allow(async_fn_in_trait)]
pub trait MessageChannel {
    async fn publish(&self, request: &SettlementRequest) -> Result<(), ChannelError>;
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Publishing to the message channel failed. {0}")]
    Publish(String),
    #[error("The message channel is not configured. {0}")]
    Configuration(String),
}
