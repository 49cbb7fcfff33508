//! Core data model types for pagequiz.
//!
//! A [`Quiz`] is the generated question set for one topic. It is written to
//! disk as one JSON document per topic and indexed by the manifest.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The generated question set for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Descriptive topic title chosen by the model.
    pub topic: String,
    /// Questions in the order the model produced them.
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Number of questions per question type, ordered by type name.
    pub fn type_breakdown(&self) -> BTreeMap<QuestionKind, usize> {
        let mut counts = BTreeMap::new();
        for q in &self.questions {
            *counts.entry(q.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// A single quiz question, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice {
        question: String,
        options: Vec<String>,
        /// Zero-based index into `options`.
        answer: usize,
        explanation: String,
    },
    TrueFalse {
        question: String,
        answer: bool,
        explanation: String,
    },
    FillBlank {
        /// Question text containing a `___` blank marker.
        question: String,
        answer: String,
        explanation: String,
    },
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Question::TrueFalse { .. } => QuestionKind::TrueFalse,
            Question::FillBlank { .. } => QuestionKind::FillBlank,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            Question::MultipleChoice { question, .. }
            | Question::TrueFalse { question, .. }
            | Question::FillBlank { question, .. } => question,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Question::MultipleChoice { explanation, .. }
            | Question::TrueFalse { explanation, .. }
            | Question::FillBlank { explanation, .. } => explanation,
        }
    }
}

/// The `type` tag of a [`Question`].
///
/// Ordered by tag name so breakdowns print alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionKind {
    FillBlank,
    MultipleChoice,
    TrueFalse,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::FillBlank => "fill_blank",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::TrueFalse => "true_false",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded page image ready for transport to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePart {
    /// MIME type of the encoded payload (e.g. "image/jpeg").
    pub mime_type: String,
    /// Standard base64 encoding of the image bytes.
    pub data: String,
}
