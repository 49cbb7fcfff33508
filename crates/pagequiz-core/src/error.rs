//! Response parsing errors.
//!
//! Both variants carry the fence-stripped model output so the operator can
//! inspect exactly what the model returned.

use thiserror::Error;

/// Errors produced while turning raw model output into a quiz.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response is not valid JSON after fence stripping.
    #[error("model response is not valid JSON")]
    Json {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    /// The response is valid JSON but not shaped like a quiz.
    #[error("model response does not match the quiz schema: {message}")]
    Schema { message: String, raw: String },
}

impl ParseError {
    /// The offending response text.
    pub fn raw(&self) -> &str {
        match self {
            ParseError::Json { raw, .. } | ParseError::Schema { raw, .. } => raw,
        }
    }
}
