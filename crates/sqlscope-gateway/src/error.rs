//! Error taxonomy for backend calls.

use sqlscope_core::ScopeError;

/// Errors from the query backend.
///
/// Three cases, matching what a caller can observe: the request never got a
/// response, the server answered with a non-2xx status, or the body arrived
/// but lacked an expected field.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {status}")]
    Server { status: u16 },
    #[error("malformed response: missing or invalid field `{field}`")]
    Malformed { field: &'static str },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

impl From<GatewayError> for ScopeError {
    fn from(err: GatewayError) -> Self {
        ScopeError::Gateway(err.to_string())
    }
}
