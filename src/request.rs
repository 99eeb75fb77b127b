use serde::Deserialize;

use crate::error::SolveError;

pub const QUESTION_REQUIRED: &str = "Question is required";
pub const INVALID_BODY: &str = "Invalid JSON body";

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    subject: Option<String>,
}

/// A validated solve request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    pub question: String,
    pub subject: String,
}

impl SolveRequest {
    /// Validate a raw POST body. A missing body is treated as `{}`.
    ///
    /// The question must be non-blank after trimming but is otherwise kept
    /// verbatim. A missing or blank subject becomes `default_subject`.
    pub fn from_body(body: Option<&str>, default_subject: &str) -> Result<Self, SolveError> {
        let body = body.filter(|b| !b.trim().is_empty()).unwrap_or("{}");
        let raw: RawRequest = serde_json::from_str(body)
            .map_err(|_| SolveError::Validation(INVALID_BODY.to_string()))?;

        let question = raw
            .question
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| SolveError::Validation(QUESTION_REQUIRED.to_string()))?;

        let subject = raw
            .subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_subject.to_string());

        Ok(Self { question, subject })
    }
}
