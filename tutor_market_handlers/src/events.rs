//! The invocation envelope: inbound request payloads, the queue batch container, and the uniform response
//! shape every handler returns.
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::HandlerError;

pub const CORS_ALLOW_METHODS: &str = "OPTIONS, GET, POST, PUT";

//--------------------------------------    LambdaRequest    ---------------------------------------------------------

/// An inbound request payload in the API-gateway envelope shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LambdaRequest {
    /// Only consulted to short-circuit pre-flight OPTIONS requests.
    #[serde(rename = "httpMethod", default)]
    pub http_method: Option<String>,
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// The JSON-encoded body, for write operations.
    #[serde(default)]
    pub body: Option<String>,
}

impl LambdaRequest {
    pub fn with_body<S: Into<String>>(body: S) -> Self {
        Self { body: Some(body.into()), ..Default::default() }
    }

    pub fn with_query(params: &[(&str, &str)]) -> Self {
        let params = params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { query_string_parameters: Some(params), ..Default::default() }
    }

    pub fn preflight() -> Self {
        Self { http_method: Some("OPTIONS".into()), ..Default::default() }
    }

    pub fn is_preflight(&self) -> bool {
        self.http_method.as_deref() == Some("OPTIONS")
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters.as_ref().and_then(|params| params.get(name)).map(String::as_str)
    }

    /// Parses the JSON body, yielding a `Validation` error when the body is absent, empty or malformed.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let body = self
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| HandlerError::Validation("The request body is empty".into()))?;
        serde_json::from_str(body)
            .map_err(|e| HandlerError::Validation(format!("The request body is not valid JSON. {e}")))
    }
}

//--------------------------------------    LambdaResponse   ---------------------------------------------------------

/// The uniform response envelope. Every response, including errors, carries the permissive cross-origin
/// headers the storefront expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// A JSON-encoded string, not a nested object.
    pub body: String,
}

fn cors_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), CORS_ALLOW_METHODS.to_string()),
        ("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

impl LambdaResponse {
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Result<Self, HandlerError> {
        let body = serde_json::to_string(value).map_err(|e| HandlerError::Serialization(e.to_string()))?;
        Ok(Self { status_code, headers: cors_headers(), body })
    }

    pub fn message(status_code: u16, message: &str) -> Self {
        Self { status_code, headers: cors_headers(), body: json!({ "message": message }).to_string() }
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self { status_code, headers: cors_headers(), body: json!({ "error": message }).to_string() }
    }

    pub fn preflight() -> Self {
        Self::message(200, "CORS OK!")
    }

    /// The body parsed back into a JSON value. Mostly useful in tests and diagnostics.
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

//--------------------------------------    MessageBatch     ---------------------------------------------------------

/// The batch container handed to the settlement worker. Zero records is a valid batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<MessageRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub body: String,
}

impl MessageBatch {
    pub fn of_bodies(bodies: &[&str]) -> Self {
        Self { records: bodies.iter().map(|b| MessageRecord { body: b.to_string() }).collect() }
    }
}
