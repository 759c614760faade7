// src/store/questions.rs

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::models::question::{Question, QuestionDocument};

/// Read-only category map loaded from the question source document.
///
/// A missing or malformed document loads as an empty repository with a
/// logged warning; there is no partial-parse recovery. Loaded once at
/// startup and treated as static for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct QuestionRepository {
    categories: Arc<BTreeMap<String, Vec<Question>>>,
}

impl QuestionRepository {
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "Question source {} not readable ({}); no categories loaded",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        let doc: QuestionDocument = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "Question source {} is not valid JSON ({}); no categories loaded",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        if let Err(reason) = validate(&doc.categories) {
            tracing::warn!(
                "Question source {} rejected: {}; no categories loaded",
                path.display(),
                reason
            );
            return Self::default();
        }

        Self {
            categories: Arc::new(doc.categories),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn question_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Questions of one category, in document order.
    pub fn get(&self, name: &str) -> Option<&[Question]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Categories in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Question>)> {
        self.categories.iter()
    }
}

/// Structural checks beyond JSON well-formedness. One bad question rejects
/// the whole document, matching the all-or-nothing load contract.
fn validate(categories: &BTreeMap<String, Vec<Question>>) -> Result<(), String> {
    for (name, questions) in categories {
        if questions.is_empty() {
            return Err(format!("category '{}' has no questions", name));
        }
        for (i, q) in questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(format!(
                    "category '{}' question {} has fewer than two options",
                    name, i
                ));
            }
            if q.correct >= q.options.len() {
                return Err(format!(
                    "category '{}' question {} has correct index {} out of range",
                    name, i, q.correct
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quizmaster-qs-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let repo = QuestionRepository::load(Path::new("/nonexistent/questions.json"));
        assert!(repo.is_empty());
        assert_eq!(repo.question_count(), 0);
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let path = scratch_file("questions.json");
        std::fs::write(&path, "{ not json at all").unwrap();

        let repo = QuestionRepository::load(&path);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_out_of_range_correct_index_rejects_whole_document() {
        let path = scratch_file("questions.json");
        let doc = serde_json::json!({
            "categories": {
                "Good": [
                    {"question": "ok?", "options": ["a", "b"], "correct": 0, "difficulty": "easy"}
                ],
                "Bad": [
                    {"question": "broken?", "options": ["a", "b"], "correct": 5, "difficulty": "hard"}
                ]
            }
        });
        std::fs::write(&path, doc.to_string()).unwrap();

        // No partial recovery: the valid category must not survive either.
        let repo = QuestionRepository::load(&path);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_valid_document_loads_with_default_points() {
        let path = scratch_file("questions.json");
        let doc = serde_json::json!({
            "categories": {
                "Science": [
                    {"question": "H2O?", "options": ["Water", "Salt"], "correct": 0, "difficulty": "easy"},
                    {"question": "Au?", "options": ["Silver", "Gold"], "correct": 1, "difficulty": "medium", "points": 20}
                ]
            }
        });
        std::fs::write(&path, doc.to_string()).unwrap();

        let repo = QuestionRepository::load(&path);
        assert_eq!(repo.category_count(), 1);

        let questions = repo.get("Science").unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].points, 10);
        assert_eq!(questions[1].points, 20);
        assert!(repo.get("History").is_none());
    }
}
