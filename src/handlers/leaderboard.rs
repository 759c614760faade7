// src/handlers/leaderboard.rs

use std::collections::{BTreeMap, HashSet};

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::AppError,
    models::highscore::HighscoreEntry,
    store::{HighscoreStore, highscores::MAX_ENTRIES},
    utils::jwt::Claims,
};

const MEDALS: [&str; 3] = ["gold", "silver", "bronze"];
const DEFAULT_DISPLAY_COUNT: usize = 10;
const PERSONAL_RECENT_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// Category filter; absent or "All" means every category.
    pub category: Option<String>,
    /// Display count, capped at the store size limit.
    pub limit: Option<usize>,
}

/// One displayed leaderboard row.
#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<&'static str>,
    #[serde(flatten)]
    pub entry: HighscoreEntry,
}

#[derive(Debug, Serialize)]
struct CategoryStats {
    attempts: usize,
    average_score: f64,
    highest_score: i64,
}

/// The leaderboard: filtered, ranked rows plus aggregate statistics.
///
/// The store keeps entries best-first, so filtering and truncating preserve
/// rank order; global and per-category stats always cover the full list.
pub async fn get_leaderboard(
    State(store): State<HighscoreStore>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let all = store.load_all();
    let limit = params
        .limit
        .unwrap_or(DEFAULT_DISPLAY_COUNT)
        .clamp(1, MAX_ENTRIES);

    let category_filter = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

    let entries: Vec<RankedEntry> = all
        .iter()
        .filter(|e| category_filter.is_none_or(|c| e.category == c))
        .take(limit)
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            medal: MEDALS.get(i).copied(),
            entry: entry.clone(),
        })
        .collect();

    let unique_players: HashSet<&str> = all.iter().map(|e| e.player_name.as_str()).collect();
    let average_score = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|e| e.score).sum::<i64>() as f64 / all.len() as f64
    };
    let highest_score = all.iter().map(|e| e.score).max().unwrap_or(0);

    let mut by_category: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for entry in &all {
        let stats = by_category
            .entry(entry.category.clone())
            .or_insert(CategoryStats {
                attempts: 0,
                average_score: 0.0,
                highest_score: 0,
            });
        stats.attempts += 1;
        // average_score holds the running total until the final pass below.
        stats.average_score += entry.score as f64;
        stats.highest_score = stats.highest_score.max(entry.score);
    }
    for stats in by_category.values_mut() {
        stats.average_score /= stats.attempts as f64;
    }

    Ok(Json(json!({
        "entries": entries,
        "stats": {
            "total_scores": all.len(),
            "unique_players": unique_players.len(),
            "average_score": average_score,
            "highest_score": highest_score,
        },
        "by_category": by_category
    })))
}

/// Personal-best slice for the authenticated player: best entry, attempt
/// count, average, and the top recent attempts.
pub async fn personal_best(
    State(store): State<HighscoreStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let mut mine: Vec<HighscoreEntry> = store
        .load_all()
        .into_iter()
        .filter(|e| e.player_name == claims.sub)
        .collect();

    if mine.is_empty() {
        return Ok(Json(json!({
            "username": claims.sub,
            "attempts": 0,
            "notice": "No scores yet. Complete a quiz to see your stats here."
        })));
    }

    mine.sort_by(|a, b| b.score.cmp(&a.score));
    let attempts = mine.len();
    let average_score = mine.iter().map(|e| e.score).sum::<i64>() as f64 / attempts as f64;
    let best = &mine[0];

    Ok(Json(json!({
        "username": claims.sub,
        "attempts": attempts,
        "average_score": average_score,
        "best": best,
        "recent": &mine[..attempts.min(PERSONAL_RECENT_COUNT)]
    })))
}
