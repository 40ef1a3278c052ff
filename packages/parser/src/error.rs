use std::time::Duration;
use thiserror::Error;

pub type CompletionResult<T> = Result<T, CompletionError>;

/// Failure talking to a completion provider
#[derive(Error, Debug, Clone)]
pub enum CompletionError {
    /// Provider not configured or unreachable
    #[error("provider not available: {0}")]
    Unavailable(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Why the model tier produced nothing usable. Never surfaced to callers;
/// any of these sends the parser to the keyword tier.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no completion provider configured")]
    NoProvider,

    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response JSON is not an array")]
    NotAnArray,

    #[error("response contained no usable operations")]
    NoOperations,
}
