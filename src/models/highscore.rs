// src/models/highscore.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::session::SessionSummary;

/// One persisted record of a completed quiz attempt.
/// Immutable once written; lives in the score-sorted, capped highscore file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub player_name: String,
    pub category: String,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: usize,
    /// Accuracy in percent, one decimal place.
    pub percentage: f64,
    /// Completion time, "YYYY-MM-DD HH:MM:SS".
    pub date: String,
}

impl HighscoreEntry {
    /// Builds the entry recorded when a session completes, stamped with the
    /// current time.
    pub fn from_summary(summary: &SessionSummary) -> Self {
        Self {
            player_name: summary.player_name.clone(),
            category: summary.category.clone(),
            score: summary.score,
            correct_answers: summary.correct_answers,
            total_questions: summary.total_questions,
            percentage: summary.percentage,
            date: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
