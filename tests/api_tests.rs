// tests/api_tests.rs

use std::path::{Path, PathBuf};

use quizmaster::{config::Config, routes, state::AppState};

/// Helper: a fresh data directory with a small question set.
fn temp_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quizmaster-api-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp data dir");
    dir
}

fn write_questions(dir: &Path) {
    let doc = serde_json::json!({
        "categories": {
            "History": [
                {
                    "question": "Which empire built the Colosseum?",
                    "options": ["Greek", "Roman", "Ottoman"],
                    "correct": 1,
                    "difficulty": "easy"
                },
                {
                    "question": "In which year did the Berlin Wall fall?",
                    "options": ["1989", "1991", "1985"],
                    "correct": 0,
                    "difficulty": "medium"
                }
            ],
            "Science": [
                {
                    "question": "What is the chemical symbol for gold?",
                    "options": ["Ag", "Au"],
                    "correct": 1,
                    "difficulty": "easy"
                },
                {
                    "question": "Which planet is known as the Red Planet?",
                    "options": ["Venus", "Jupiter", "Mars"],
                    "correct": 2,
                    "difficulty": "easy",
                    "points": 20
                }
            ]
        }
    });
    std::fs::write(dir.join("questions.json"), doc.to_string())
        .expect("Failed to write questions file");
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let data_dir = temp_data_dir();
    write_questions(&data_dir);

    let config = Config {
        data_dir,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        admin_username: None,
        admin_password: None,
    };

    let state = AppState::new(config);
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": unique_name,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], unique_name);
    assert!(body.get("password").is_none(), "hash must never leak");
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send a username that is too short
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": "yo",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let payload = serde_json::json!({
        "username": unique_name,
        "password": "password123"
    });

    let first = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Login failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["type"], "Bearer");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // Wrong password is rejected
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Login failed");
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn categories_list_difficulty_breakdown() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/categories", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);

    // BTreeMap keeps name order: History before Science.
    assert_eq!(categories[0]["name"], "History");
    assert_eq!(categories[0]["question_count"], 2);
    assert_eq!(categories[0]["difficulties"]["easy"], 1);
    assert_eq!(categories[0]["difficulties"]["medium"], 1);
    assert_eq!(
        categories[1]["sample_questions"].as_array().unwrap().len(),
        2
    );
}

#[tokio::test]
async fn personal_best_requires_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/leaderboard/me", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}
