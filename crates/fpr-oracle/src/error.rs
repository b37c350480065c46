//! Oracle client error types.
//!
//! Callers treat every variant the same way for retry purposes. The
//! distinction exists for logs and for tests: a response that arrived but
//! could not be read as the required shape is `MalformedJson` or `Schema`,
//! never a low-confidence answer.

/// Errors from oracle calls.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP transport error (connection, TLS, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("oracle {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The HTTP envelope could not be deserialized.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The completion carried no content.
    #[error("empty completion from {endpoint}")]
    EmptyCompletion { endpoint: String },
    /// The model's content was not valid JSON.
    #[error("model output from {endpoint} is not valid JSON: {source}")]
    MalformedJson {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The model's JSON lacked required fields or had the wrong types.
    #[error("model output from {endpoint} does not match the expected schema: {reason}")]
    Schema { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl OracleError {
    /// Whether the response arrived but had the wrong shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::MalformedJson { .. } | Self::Schema { .. })
    }
}
