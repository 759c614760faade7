// src/main.rs

use quizmaster::config::Config;
use quizmaster::models::user::User;
use quizmaster::routes;
use quizmaster::state::AppState;
use quizmaster::store::UserStore;
use quizmaster::utils::hash::hash_password;

use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Create AppState (loads the question repository once)
    let state = AppState::new(config.clone());

    if state.questions.is_empty() {
        tracing::warn!(
            "No quiz categories loaded from {}; players will see an empty category list",
            config.questions_path().display()
        );
    } else {
        tracing::info!(
            "Loaded {} categories ({} questions)",
            state.questions.category_count(),
            state.questions.question_count()
        );
    }

    // Seed Admin User
    if let Err(e) = seed_admin_user(&state.users, &config) {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

fn seed_admin_user(users: &UserStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if users.find(username).is_none() {
            tracing::info!("Seeding admin user: {}", username);
            let hashed_password = hash_password(password)?;

            users.insert(User {
                username: username.clone(),
                password: hashed_password,
                role: "admin".to_string(),
                created_at: chrono::Utc::now(),
            })?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}
