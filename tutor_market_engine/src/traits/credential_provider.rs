use serde::Deserialize;
use thiserror::Error;
use tm_common::Secret;

/// Database login credentials, as stored in the secret store.
///
/// The secret payload is a JSON object with `username` and `password` keys. The password is wrapped in
/// [`Secret`] so it can never leak into logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbCredentials {
    pub username: String,
    pub password: Secret<String>,
}

/// The external secret-storage service that supplies database credentials.
///
/// A failed fetch is fatal for the invocation that requested it.
#[allow(async_fn_in_trait)]
pub trait CredentialProvider {
    /// Fetches and parses the credentials stored under `secret_id`.
    async fn fetch_credentials(&self, secret_id: &str) -> Result<DbCredentials, CredentialError>;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Secret {0} could not be retrieved. {1}")]
    Fetch(String, String),
    #[error("The secret payload is not a valid credentials document. {0}")]
    Malformed(String),
}
