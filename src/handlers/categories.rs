// src/handlers/categories.rs

use std::collections::BTreeMap;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::{error::AppError, store::QuestionRepository};

/// One category as shown on the category overview.
#[derive(Debug, Serialize)]
pub struct CategoryOverview {
    pub name: String,
    pub question_count: usize,
    /// Question count per difficulty, e.g. {"easy": 2, "hard": 1}.
    pub difficulties: BTreeMap<&'static str, usize>,
    /// Up to three question texts as a preview.
    pub sample_questions: Vec<String>,
}

/// Lists every category with its difficulty breakdown and sample questions.
/// An empty repository is not an error; the response carries a notice so the
/// client can show the empty state.
pub async fn list_categories(
    State(repo): State<QuestionRepository>,
) -> Result<impl IntoResponse, AppError> {
    let categories: Vec<CategoryOverview> = repo
        .iter()
        .map(|(name, questions)| {
            let mut difficulties = BTreeMap::new();
            for q in questions {
                *difficulties.entry(q.difficulty.as_str()).or_insert(0) += 1;
            }
            CategoryOverview {
                name: name.clone(),
                question_count: questions.len(),
                difficulties,
                sample_questions: questions
                    .iter()
                    .take(3)
                    .map(|q| q.question.clone())
                    .collect(),
            }
        })
        .collect();

    let notice = categories
        .is_empty()
        .then(|| "No questions available".to_string());

    Ok(Json(json!({
        "categories": categories,
        "notice": notice
    })))
}
