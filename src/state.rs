// src/state.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use uuid::Uuid;

use crate::config::Config;
use crate::models::session::QuizSession;
use crate::store::{HighscoreStore, QuestionRepository, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionRepository,
    pub highscores: HighscoreStore,
    pub users: UserStore,
    pub sessions: SessionManager,
    pub config: Config,
}

impl AppState {
    /// Wires the stores and an empty session table from configuration.
    /// The question repository is loaded once here; it stays read-only for
    /// the process lifetime.
    pub fn new(config: Config) -> Self {
        Self {
            questions: QuestionRepository::load(&config.questions_path()),
            highscores: HighscoreStore::new(config.highscores_path()),
            users: UserStore::new(config.users_path()),
            sessions: SessionManager::default(),
            config,
        }
    }
}

impl FromRef<AppState> for QuestionRepository {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for HighscoreStore {
    fn from_ref(state: &AppState) -> Self {
        state.highscores.clone()
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for SessionManager {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

/// Uuid-keyed table of live quiz sessions.
///
/// One session per browsing context; a completed session stays addressable
/// (for the result view and restart) until the player exits.
#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<Mutex<HashMap<Uuid, QuizSession>>>,
}

impl SessionManager {
    /// Stores a freshly started session and returns its handle.
    pub fn create(&self, session: QuizSession) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().insert(id, session);
        id
    }

    /// Runs `f` against the session, if it exists.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut QuizSession) -> R) -> Option<R> {
        self.lock().get_mut(&id).map(f)
    }

    /// Discards the session. Returns it so callers can log the outcome.
    pub fn remove(&self, id: Uuid) -> Option<QuizSession> {
        self.lock().remove(&id)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, QuizSession>> {
        // A poisoned lock only means another request panicked mid-mutation;
        // the session table itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
