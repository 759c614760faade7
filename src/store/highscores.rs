// src/store/highscores.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::highscore::HighscoreEntry;

/// Maximum number of entries kept on disk.
pub const MAX_ENTRIES: usize = 50;

/// Flat-file JSON store for completed-quiz records.
///
/// Every append rewrites the whole document; the list is small and capped.
/// The mutex serializes the read-modify-write cycle so two players finishing
/// at the same time cannot lose each other's update.
#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl HighscoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// All entries, best first. An absent or corrupt file reads as empty.
    pub fn load_all(&self) -> Vec<HighscoreEntry> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Highscore file {} is corrupt ({}); treating as empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Appends one entry, re-sorts best first (ties keep insertion order)
    /// and truncates to the top `MAX_ENTRIES` before rewriting the file.
    pub fn append(&self, entry: HighscoreEntry) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut entries = self.load_all();
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        self.persist(&entries)
    }

    fn persist(&self, entries: &[HighscoreEntry]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}
