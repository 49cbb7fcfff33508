//! Model response parser.
//!
//! Turns raw model output into a [`Quiz`]. The model is asked for bare JSON
//! but sometimes wraps it in a markdown fence, so fences are stripped before
//! decoding. Decoding happens in two steps: strict JSON into a generic
//! [`Value`], then conversion into the closed [`Question`] variants.

use serde_json::Value;

use crate::error::ParseError;
use crate::model::{Question, Quiz};
use crate::prompt::BLANK_MARKER;

/// Strip a markdown code fence wrapped around a model response.
///
/// Removes a leading ```` ```json ```` (or, failing that, a bare ```` ``` ````)
/// and a trailing ```` ``` ````, then trims surrounding whitespace.
pub fn strip_fences(response: &str) -> &str {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse a raw model response into a quiz.
///
/// Fails with [`ParseError::Json`] when the fence-stripped text is not JSON,
/// and with [`ParseError::Schema`] when it is JSON but a question has an
/// unknown `type` or lacks a field its type requires.
pub fn parse_quiz_response(response: &str) -> Result<Quiz, ParseError> {
    let text = strip_fences(response);

    let value: Value = serde_json::from_str(text).map_err(|source| ParseError::Json {
        source,
        raw: text.to_string(),
    })?;

    quiz_from_value(value).map_err(|message| ParseError::Schema {
        message,
        raw: text.to_string(),
    })
}

fn quiz_from_value(value: Value) -> Result<Quiz, String> {
    let Value::Object(mut root) = value else {
        return Err("expected a JSON object at the top level".into());
    };

    let topic = match root.remove("topic") {
        Some(Value::String(topic)) => topic,
        Some(_) => return Err("`topic` must be a string".into()),
        None => return Err("missing field `topic`".into()),
    };

    let items = match root.remove("questions") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err("`questions` must be an array".into()),
        None => return Err("missing field `questions`".into()),
    };

    let questions = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<Question>(item)
                .map_err(|e| format!("question {}: {e}", i + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz { topic, questions })
}

/// A non-fatal issue found in a parsed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizWarning {
    /// 1-based question number, if the warning concerns one question.
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a quiz for issues the schema alone does not catch.
pub fn validate_quiz(quiz: &Quiz) -> Vec<QuizWarning> {
    let mut warnings = Vec::new();

    if quiz.topic.trim().is_empty() {
        warnings.push(QuizWarning {
            question: None,
            message: "topic is empty".into(),
        });
    }

    if quiz.questions.is_empty() {
        warnings.push(QuizWarning {
            question: None,
            message: "quiz has no questions".into(),
        });
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        let number = Some(i + 1);

        if q.question().trim().is_empty() {
            warnings.push(QuizWarning {
                question: number,
                message: "question text is empty".into(),
            });
        }

        match q {
            Question::MultipleChoice {
                options, answer, ..
            } => {
                if options.len() < 2 {
                    warnings.push(QuizWarning {
                        question: number,
                        message: format!(
                            "multiple_choice has {} option(s), expected at least 2",
                            options.len()
                        ),
                    });
                }
                if *answer >= options.len() {
                    warnings.push(QuizWarning {
                        question: number,
                        message: format!(
                            "answer index {answer} is out of range for {} option(s)",
                            options.len()
                        ),
                    });
                }
            }
            Question::FillBlank { question, .. } => {
                if !question.contains(BLANK_MARKER) {
                    warnings.push(QuizWarning {
                        question: number,
                        message: format!("fill_blank question has no {BLANK_MARKER} marker"),
                    });
                }
            }
            Question::TrueFalse { .. } => {}
        }
    }

    warnings
}
