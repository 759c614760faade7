// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, categories, leaderboard, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, categories, quiz, leaderboard).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores, session table, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let category_routes = Router::new().route("/", get(categories::list_categories));

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/{id}", get(quiz::get_progress).delete(quiz::exit_quiz))
        .route("/{id}/answer", post(quiz::submit_answer))
        .route("/{id}/skip", post(quiz::skip_question))
        .route("/{id}/restart", post(quiz::restart_quiz))
        .route("/{id}/result", get(quiz::quiz_result));

    let leaderboard_routes = Router::new()
        .route("/", get(leaderboard::get_leaderboard))
        // Protected: the personal-best slice needs to know who is asking
        .merge(
            Router::new()
                .route("/me", get(leaderboard::personal_best))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/leaderboard", leaderboard_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
