// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        highscore::HighscoreEntry,
        question::PublicQuestion,
        session::{AnswerFeedback, QuizSession, SessionSummary},
    },
    state::SessionManager,
    store::{HighscoreStore, QuestionRepository},
};

/// DTO for starting a quiz session.
#[derive(Debug, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 1, max = 50, message = "Player name must not be empty."))]
    pub player_name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Question order is shuffled by default; disable to keep source order.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

/// DTO for answering the current question.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Index into the current question's options.
    pub option: usize,
}

/// Progress view computed fresh from the session after every request.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub player_name: String,
    pub category: String,
    pub current_index: usize,
    pub total_questions: usize,
    pub score: i64,
    pub correct_count: i64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<PublicQuestion>,
}

impl ProgressResponse {
    fn from_session(session: &QuizSession) -> Self {
        Self {
            player_name: session.player_name.clone(),
            category: session.category.clone(),
            current_index: session.current_index(),
            total_questions: session.total_questions(),
            score: session.score(),
            correct_count: session.correct_count(),
            completed: session.is_complete(),
            question: session.current_question(),
        }
    }
}

/// Response for an answer/skip transition. Carries the final summary and
/// the persistence outcome on the transition that completes the quiz.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    #[serde(flatten)]
    pub feedback: AnswerFeedback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<PublicQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highscore_saved: Option<bool>,
}

/// Starts a new quiz session for a player and category.
///
/// Guards: non-empty player name, category must exist. Returns 201 with the
/// session handle and the first question.
pub async fn start_quiz(
    State(repo): State<QuestionRepository>,
    State(sessions): State<SessionManager>,
    Json(payload): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let questions = repo.get(&payload.category).ok_or_else(|| {
        AppError::NotFound(format!("Category '{}' not found", payload.category))
    })?;

    let session = QuizSession::start(
        &payload.player_name,
        &payload.category,
        questions.to_vec(),
        payload.shuffle,
    )?;

    let question = session.current_question();
    let total_questions = session.total_questions();
    let session_id = sessions.create(session);

    tracing::info!(
        "Started quiz: player={} category={} questions={}",
        payload.player_name,
        payload.category,
        total_questions
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "session_id": session_id,
            "total_questions": total_questions,
            "question": question
        })),
    ))
}

/// Current progress and question for a running session.
pub async fn get_progress(
    State(sessions): State<SessionManager>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let progress = sessions
        .with_session(session_id, |session| ProgressResponse::from_session(session))
        .ok_or_else(session_not_found)?;

    Ok(Json(progress))
}

/// Submits an answer for the current question.
pub async fn submit_answer(
    State(sessions): State<SessionManager>,
    State(highscores): State<HighscoreStore>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    advance(&sessions, &highscores, session_id, Some(payload.option))
}

/// Skips the current question.
pub async fn skip_question(
    State(sessions): State<SessionManager>,
    State(highscores): State<HighscoreStore>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    advance(&sessions, &highscores, session_id, None)
}

/// Runs one answer/skip transition. When the transition completes the quiz,
/// exactly one highscore entry is appended; a failed write is logged and
/// reported, not silently dropped.
fn advance(
    sessions: &SessionManager,
    highscores: &HighscoreStore,
    session_id: Uuid,
    selected: Option<usize>,
) -> Result<Json<TransitionResponse>, AppError> {
    let outcome = sessions
        .with_session(session_id, |session| {
            let feedback = match selected {
                Some(option) => session.submit_answer(option)?,
                None => session.skip()?,
            };
            let summary = if feedback.finished {
                session.summary()
            } else {
                None
            };
            Ok::<_, AppError>((feedback, session.current_question(), summary))
        })
        .ok_or_else(session_not_found)?;
    let (feedback, question, summary) = outcome?;

    let highscore_saved = match &summary {
        Some(summary) => {
            let entry = HighscoreEntry::from_summary(summary);
            match highscores.append(entry) {
                Ok(()) => Some(true),
                Err(e) => {
                    tracing::error!(
                        "Failed to save highscore for {}: {}",
                        summary.player_name,
                        e
                    );
                    Some(false)
                }
            }
        }
        None => None,
    };

    Ok(Json(TransitionResponse {
        feedback,
        question,
        summary,
        highscore_saved,
    }))
}

/// Resets a session to its first question, keeping player and category.
pub async fn restart_quiz(
    State(sessions): State<SessionManager>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let progress = sessions
        .with_session(session_id, |session| {
            session.restart();
            ProgressResponse::from_session(session)
        })
        .ok_or_else(session_not_found)?;

    Ok(Json(progress))
}

/// Final result with the full answer review.
pub async fn quiz_result(
    State(sessions): State<SessionManager>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = sessions
        .with_session(session_id, |session| session.summary())
        .ok_or_else(session_not_found)?
        .ok_or_else(|| AppError::BadRequest("Quiz is still in progress".to_string()))?;

    Ok(Json(summary))
}

/// Discards a session.
pub async fn exit_quiz(
    State(sessions): State<SessionManager>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.remove(session_id).ok_or_else(session_not_found)?;

    tracing::info!(
        "Ended quiz: player={} category={} answered={}/{}",
        session.player_name,
        session.category,
        session.current_index(),
        session.total_questions()
    );

    Ok(Json(json!({ "message": "Session ended" })))
}

fn session_not_found() -> AppError {
    AppError::NotFound("Quiz session not found".to_string())
}
