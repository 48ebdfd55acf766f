//! Explicit dependency wiring for handler invocations.
//!
//! There are no module-level clients. The runtime is constructed once at process startup with its credential
//! provider injected, and every invocation asks it for a fresh, invocation-scoped database handle.
use log::*;
use tm_common::Secret;
use tutor_market_engine::{
    db_types::SettlementRequest,
    ChannelError,
    CredentialError,
    CredentialProvider,
    DbCredentials,
    MessageChannel,
    MySqlDatabase,
};

use crate::{config::HandlerConfig, errors::HandlerError};

pub struct Runtime<P> {
    config: HandlerConfig,
    credentials: P,
}

impl<P: CredentialProvider> Runtime<P> {
    pub fn new(config: HandlerConfig, credentials: P) -> Self {
        Self { config, credentials }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Fetches the database credentials and opens the invocation-scoped connection through the proxy.
    ///
    /// The returned handle owns the connection; dropping it releases the connection on every exit path.
    pub async fn database(&self) -> Result<MySqlDatabase, HandlerError> {
        debug!("🔐️ Fetching database credentials for secret {}", self.config.secret_id);
        let credentials = self.credentials.fetch_credentials(&self.config.secret_id).await?;
        let db = MySqlDatabase::connect(&self.config.db_proxy, &self.config.db_name, &credentials).await?;
        Ok(db)
    }
}

/// Local stand-in for the secret store: reads `DB_USERNAME` and `DB_PASSWORD` from the environment. The
/// deployed runtime injects a provider backed by the platform's secret service instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider {
    async fn fetch_credentials(&self, secret_id: &str) -> Result<DbCredentials, CredentialError> {
        let username = std::env::var("DB_USERNAME")
            .map_err(|_| CredentialError::Fetch(secret_id.to_string(), "DB_USERNAME is not set".into()))?;
        let password = std::env::var("DB_PASSWORD")
            .map_err(|_| CredentialError::Fetch(secret_id.to_string(), "DB_PASSWORD is not set".into()))?;
        Ok(DbCredentials { username, password: Secret::new(password) })
    }
}

/// Local stand-in for the queue transport: serializes the settlement request and logs it against the queue
/// address. The deployed runtime injects a channel backed by the platform queue.
#[derive(Debug, Clone)]
pub struct LoggingChannel {
    queue_url: String,
}

impl LoggingChannel {
    pub fn new<S: Into<String>>(queue_url: S) -> Self {
        Self { queue_url: queue_url.into() }
    }
}

impl MessageChannel for LoggingChannel {
    async fn publish(&self, request: &SettlementRequest) -> Result<(), ChannelError> {
        let body = serde_json::to_string(request).map_err(|e| ChannelError::Publish(e.to_string()))?;
        info!("📨️ [{}] {body}", self.queue_url);
        Ok(())
    }
}
