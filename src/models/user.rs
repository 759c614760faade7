// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account record as persisted in the users file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username.
    pub username: String,

    /// Argon2 password hash. Present on disk; never sent to clients,
    /// which only ever see `UserResponse`.
    pub password: String,

    /// User role: 'player' or 'admin'.
    pub role: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public view of an account (excludes the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
