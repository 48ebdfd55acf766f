use std::env;

use crate::errors::HandlerError;

/// Configuration for a handler invocation, read from the environment.
///
/// There is no separate validation phase at process startup; a missing value fails the invocation that
/// actually needed it, as a `Configuration` error.
#[derive(Clone, Debug)]
pub struct HandlerConfig {
    /// The cloud region the external clients (secret store, queue) operate in.
    pub region: String,
    /// The identifier of the secret holding the database credentials.
    pub secret_id: String,
    /// The database proxy endpoint. Handlers never talk to the database host directly.
    pub db_proxy: String,
    pub db_name: String,
    queue_url: Option<String>,
}

impl HandlerConfig {
    pub fn new<S: Into<String>>(region: S, secret_id: S, db_proxy: S, db_name: S, queue_url: Option<String>) -> Self {
        Self {
            region: region.into(),
            secret_id: secret_id.into(),
            db_proxy: db_proxy.into(),
            db_name: db_name.into(),
            queue_url,
        }
    }

    pub fn from_env() -> Result<Self, HandlerError> {
        Ok(Self {
            region: require("REGION_NAME")?,
            secret_id: require("SECRET_ARN")?,
            db_proxy: require("DB_PROXY")?,
            db_name: require("DB_NAME")?,
            queue_url: env::var("SQS_QUEUE_URL").ok(),
        })
    }

    /// The settlement queue address. Only payment creation publishes, so its absence is reported lazily, at
    /// the publish step.
    pub fn queue_url(&self) -> Result<&str, HandlerError> {
        self.queue_url.as_deref().ok_or_else(|| HandlerError::Configuration("SQS_QUEUE_URL is not set".into()))
    }
}

fn require(name: &str) -> Result<String, HandlerError> {
    env::var(name).map_err(|_| HandlerError::Configuration(format!("{name} is not set")))
}
