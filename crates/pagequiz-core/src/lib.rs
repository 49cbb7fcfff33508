//! pagequiz-core: Quiz data model, prompt, response parsing, and traits.
//!
//! This crate defines the quiz document types that every other pagequiz
//! crate reads or writes, the fixed generation prompt, the parser that turns
//! raw model output into a [`model::Quiz`], and the generation pipeline that
//! ties a provider to that parser.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod traits;

pub use engine::{generate_quiz, parse_failure, GeneratedQuiz};
pub use error::ParseError;
pub use model::{ImagePart, Question, QuestionKind, Quiz};
pub use parser::{parse_quiz_response, strip_fences, validate_quiz, QuizWarning};
