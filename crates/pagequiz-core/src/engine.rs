//! Generation pipeline: one provider call, then parse and validate.
//!
//! Nothing here touches the filesystem, so a failed generation can never
//! leave a partial quiz file behind. Provider errors and [`ParseError`]s are
//! returned through `anyhow` and can be recovered with `downcast_ref`.

use tracing::{info, warn};

use crate::error::ParseError;
use crate::model::Quiz;
use crate::parser::{parse_quiz_response, validate_quiz, QuizWarning};
use crate::traits::{GenerateRequest, GenerationProvider, TokenUsage};

/// A parsed quiz together with what the provider reported about it.
#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    pub quiz: Quiz,
    /// Non-fatal issues found in the quiz.
    pub warnings: Vec<QuizWarning>,
    /// Model that produced the response.
    pub model: String,
    pub token_usage: TokenUsage,
    pub latency_ms: u64,
}

/// Send `request` to `provider` once and parse the reply into a quiz.
///
/// There is no retry: a provider failure or an unparseable reply is
/// returned as an error. Validation warnings are logged and returned, never
/// fatal.
pub async fn generate_quiz(
    provider: &dyn GenerationProvider,
    request: &GenerateRequest,
) -> anyhow::Result<GeneratedQuiz> {
    info!(
        provider = provider.name(),
        model = %request.model,
        images = request.images.len(),
        "requesting quiz generation"
    );

    let response = provider.generate(request).await?;
    let quiz = parse_quiz_response(&response.content)?;

    let warnings = validate_quiz(&quiz);
    for w in &warnings {
        match w.question {
            Some(n) => warn!(question = n, "{}", w.message),
            None => warn!("{}", w.message),
        }
    }

    Ok(GeneratedQuiz {
        quiz,
        warnings,
        model: response.model,
        token_usage: response.token_usage,
        latency_ms: response.latency_ms,
    })
}

/// The parse error behind a failed generation, if that is what failed.
pub fn parse_failure(err: &anyhow::Error) -> Option<&ParseError> {
    err.downcast_ref::<ParseError>()
}
