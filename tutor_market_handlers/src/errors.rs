use log::error;
use thiserror::Error;
use tutor_market_engine::{ChannelError, CredentialError, PaymentFlowError, StorageError};

use crate::events::LambdaResponse;

/// The handler-level error taxonomy. Every failure inside an invocation ends up as one of these and is
/// converted into the response envelope; nothing escapes to the invocation platform as a raw fault.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Caller-supplied input is missing or malformed. Never retried.
    #[error("Invalid request. {0}")]
    Validation(String),
    #[error("Not found. {0}")]
    NotFound(String),
    /// Required configuration or the credential fetch failed. A deployment problem, not a user error.
    #[error("Invalid handler configuration. {0}")]
    Configuration(String),
    /// The query itself failed: constraint violation, connection failure, timeout. The message text is
    /// included in the response body for diagnostics.
    #[error("A storage error occurred. {0}")]
    Storage(String),
    /// Publishing to the message channel failed after a successful insert. The payment row stays Pending.
    #[error("A message transport error occurred. {0}")]
    Transport(String),
    #[error("The response could not be serialized. {0}")]
    Serialization(String),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Configuration(_) | Self::Storage(_) | Self::Transport(_) | Self::Serialization(_) => 500,
        }
    }
}

impl From<StorageError> for HandlerError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(m) => Self::NotFound(m),
            e => Self::Storage(e.to_string()),
        }
    }
}

impl From<CredentialError> for HandlerError {
    fn from(e: CredentialError) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<ChannelError> for HandlerError {
    fn from(e: ChannelError) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<PaymentFlowError> for HandlerError {
    fn from(e: PaymentFlowError) -> Self {
        match e {
            PaymentFlowError::Storage(e) => Self::from(e),
            e @ PaymentFlowError::Transport { .. } => Self::Transport(e.to_string()),
        }
    }
}

impl From<HandlerError> for LambdaResponse {
    fn from(e: HandlerError) -> Self {
        if e.status_code() >= 500 {
            error!("🛑️ {e}");
        }
        LambdaResponse::error(e.status_code(), &e.to_string())
    }
}
