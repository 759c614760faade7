// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Difficulty levels as spelled in the question source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// One multiple-choice question, immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// The text content of the question.
    pub question: String,

    /// Ordered answer options (at least two).
    pub options: Vec<String>,

    /// Index of the correct answer within `options`.
    pub correct: usize,

    pub difficulty: Difficulty,

    /// Points awarded for a correct answer.
    #[serde(default = "default_points")]
    pub points: i64,
}

fn default_points() -> i64 {
    10
}

/// Top-level shape of the question source document:
/// `{ "categories": { "<name>": [Question, ...] } }`.
#[derive(Debug, Deserialize)]
pub struct QuestionDocument {
    pub categories: BTreeMap<String, Vec<Question>>,
}

/// DTO for sending a question to the client while a quiz is running
/// (excludes the correct index).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    /// Zero-based position within the session.
    pub index: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    pub points: i64,
}

impl PublicQuestion {
    pub fn new(index: usize, total: usize, question: &Question) -> Self {
        Self {
            index,
            total,
            question: question.question.clone(),
            options: question.options.clone(),
            difficulty: question.difficulty,
            points: question.points,
        }
    }
}
