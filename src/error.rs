//! Failure taxonomy for a solve request.
//!
//! Every variant knows the HTTP status it maps to and the message a caller
//! sees. Internal detail (upstream bodies, SQL errors, raw model output)
//! stays in the `Display` impl for logs and never reaches the response.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolveError>;

#[derive(Error, Debug)]
pub enum SolveError {
    /// Bad or missing input. The caller can fix it.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Missing operator configuration, e.g. the model API key.
    #[error("not configured: {0}")]
    Configuration(String),

    /// The completion service failed or returned no usable text.
    #[error("completion service failed: {0:#}")]
    Upstream(anyhow::Error),

    /// The model's output could not be decoded as a solution.
    #[error("failed to parse model output: {error}\nraw: {raw}")]
    Parse { error: String, raw: String },

    /// Persisting the solution failed.
    #[error("store failed: {0:#}")]
    Store(anyhow::Error),
}

impl SolveError {
    pub fn status_code(&self) -> u16 {
        match self {
            SolveError::Validation(_) => 400,
            SolveError::Configuration(_) => 500,
            SolveError::Upstream(_) | SolveError::Parse { .. } => 502,
            SolveError::Store(_) => 500,
        }
    }

    /// Message placed in the `{"error": ...}` body.
    pub fn public_message(&self) -> String {
        match self {
            SolveError::Validation(msg) | SolveError::Configuration(msg) => msg.clone(),
            SolveError::Upstream(_) => "Failed to get a solution from the model".to_string(),
            SolveError::Parse { .. } => "Model returned a malformed solution".to_string(),
            SolveError::Store(_) => "Failed to save solution".to_string(),
        }
    }
}
