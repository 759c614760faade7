// src/models/session.rs

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::AppError;
use crate::models::question::{PublicQuestion, Question};

/// Sentinel recorded in the answer log when a question is skipped.
pub const SKIPPED: &str = "Skipped";

/// One line of the answer review. Appended per question, in index order.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    /// The option text the player picked, or the `Skipped` sentinel.
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
}

/// Immediate feedback for a single answer/skip transition.
#[derive(Debug, Serialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_option: String,
    /// Points earned by this answer (0 for wrong answers and skips).
    pub awarded: i64,
    pub score: i64,
    pub finished: bool,
}

/// Final outcome of a completed session; source of the highscore entry.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub category: String,
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: usize,
    pub percentage: f64,
    pub answers: Vec<AnswerRecord>,
}

/// A player's progress through one quiz attempt.
///
/// Lifecycle: created by `start`, advanced one question at a time by
/// `submit_answer`/`skip`, read out via `summary` once every question has
/// been visited. `restart` returns to the first question keeping the player
/// and category.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub player_name: String,
    pub category: String,
    questions: Vec<Question>,
    current_index: usize,
    score: i64,
    correct_count: i64,
    answer_log: Vec<AnswerRecord>,
    /// One flag per question; rejects a second answer for the same index.
    answered: Vec<bool>,
    shuffle: bool,
}

impl QuizSession {
    /// Starts a new session over the given questions.
    ///
    /// Guards: the player name must be non-empty (whitespace does not
    /// count), and the question list must be non-empty. The repository only
    /// loads non-empty categories, so the second guard fires on misuse only.
    ///
    /// Question order is shuffled exactly once here, never mid-session.
    pub fn start(
        player_name: &str,
        category: &str,
        mut questions: Vec<Question>,
        shuffle: bool,
    ) -> Result<Self, AppError> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(AppError::BadRequest(
                "Player name must not be empty".to_string(),
            ));
        }
        if questions.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Category '{}' has no questions",
                category
            )));
        }

        if shuffle {
            questions.shuffle(&mut rand::rng());
        }

        let answered = vec![false; questions.len()];
        Ok(Self {
            player_name: player_name.to_string(),
            category: category.to_string(),
            questions,
            current_index: 0,
            score: 0,
            correct_count: 0,
            answer_log: Vec::new(),
            answered,
            shuffle,
        })
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn correct_count(&self) -> i64 {
        self.correct_count
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// The question currently waiting for an answer; `None` once complete.
    pub fn current_question(&self) -> Option<PublicQuestion> {
        self.questions
            .get(self.current_index)
            .map(|q| PublicQuestion::new(self.current_index, self.questions.len(), q))
    }

    /// Submits an answer for the current question and advances.
    ///
    /// Guards: the session must still be in progress, the current question
    /// must not already carry an answer, and `selected` must be a valid
    /// option index. A rejected submission mutates nothing.
    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerFeedback, AppError> {
        let index = self.current_index;
        let question = self.questions.get(index).ok_or_else(|| {
            AppError::BadRequest("Quiz is already complete".to_string())
        })?;

        if self.answered[index] {
            return Err(AppError::BadRequest(format!(
                "Question {} was already answered",
                index + 1
            )));
        }

        let selected_option = question
            .options
            .get(selected)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Option index {} is out of range", selected))
            })?
            .clone();

        let correct_option = question.options[question.correct].clone();
        let is_correct = selected == question.correct;
        let awarded = if is_correct { question.points } else { 0 };
        let record = AnswerRecord {
            question: question.question.clone(),
            selected: selected_option,
            correct: correct_option.clone(),
            is_correct,
        };

        self.answer_log.push(record);
        self.answered[index] = true;
        self.score += awarded;
        if is_correct {
            self.correct_count += 1;
        }
        self.current_index += 1;

        Ok(AnswerFeedback {
            is_correct,
            correct_option,
            awarded,
            score: self.score,
            finished: self.is_complete(),
        })
    }

    /// Skips the current question: logs the sentinel record and advances
    /// without touching score or correct count.
    pub fn skip(&mut self) -> Result<AnswerFeedback, AppError> {
        let index = self.current_index;
        let question = self.questions.get(index).ok_or_else(|| {
            AppError::BadRequest("Quiz is already complete".to_string())
        })?;

        let correct_option = question.options[question.correct].clone();
        self.answer_log.push(AnswerRecord {
            question: question.question.clone(),
            selected: SKIPPED.to_string(),
            correct: correct_option.clone(),
            is_correct: false,
        });
        self.answered[index] = true;
        self.current_index += 1;

        Ok(AnswerFeedback {
            is_correct: false,
            correct_option,
            awarded: 0,
            score: self.score,
            finished: self.is_complete(),
        })
    }

    /// Resets to the first question, keeping player name and category.
    /// Reshuffles when the session was started with shuffling on.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.correct_count = 0;
        self.answer_log.clear();
        self.answered.fill(false);
        if self.shuffle {
            self.questions.shuffle(&mut rand::rng());
        }
    }

    /// Final result; `None` while the quiz is still in progress.
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.is_complete() {
            return None;
        }
        Some(SessionSummary {
            player_name: self.player_name.clone(),
            category: self.category.clone(),
            score: self.score,
            correct_answers: self.correct_count,
            total_questions: self.questions.len(),
            percentage: percentage(self.correct_count, self.questions.len()),
            answers: self.answer_log.clone(),
        })
    }
}

/// Accuracy in percent, rounded to one decimal place.
pub fn percentage(correct: i64, total: usize) -> f64 {
    (correct as f64 / total as f64 * 1000.0).round() / 10.0
}
