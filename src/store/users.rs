// src/store/users.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::user::User;

/// Flat-file JSON store for accounts, one `User` record per registration.
/// Same full-rewrite discipline as the highscore store.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl UserStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn find(&self, username: &str) -> Option<User> {
        self.load().into_iter().find(|u| u.username == username)
    }

    /// Persists a new account. Fails with `Conflict` when the username is
    /// already taken.
    pub fn insert(&self, user: User) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut users = self.load();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        users.push(user);
        self.persist(&users)
    }

    fn load(&self) -> Vec<User> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(
                    "User file {} is corrupt ({}); treating as empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, users: &[User]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}
