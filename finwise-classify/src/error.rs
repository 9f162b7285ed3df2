use thiserror::Error;

/// Why a remote batch could not be used. Always absorbed by the adapter.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model host returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion body: {0}")]
    MalformedBody(String),

    #[error("expected {expected} category lines, got {got}")]
    LineCount { expected: usize, got: usize },
}

/// Structurally invalid categorization payload; the only error a caller sees
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing transactions")]
    MissingTransactions,

    #[error("transactions must be an array")]
    NotAnArray,
}

impl PayloadError {
    /// HTTP-style status paired with the `{ "error": ... }` body
    pub fn status_code(&self) -> u16 {
        400
    }
}
