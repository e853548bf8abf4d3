use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{
    error::{Lookup, QuizError},
    spec::Quiz,
};

type Snapshots = HashMap<String, Arc<Quiz>>;

/// Latest full-quiz snapshot per quiz id.
///
/// Every install publishes a fresh map with one atomic pointer swap, so
/// readers never lock and never see a half-written quiz. Entries are only
/// ever replaced, never removed.
#[derive(Debug)]
pub struct QuizStore {
    snapshots: ArcSwap<Snapshots>,
}

impl Default for QuizStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizStore {
    pub fn new() -> Self {
        Self {
            snapshots: ArcSwap::from_pointee(Snapshots::new()),
        }
    }

    /// Install `quiz`, replacing any earlier snapshot with the same id.
    pub fn insert(&self, quiz: Quiz) -> Arc<Quiz> {
        let quiz = Arc::new(quiz);
        self.snapshots.rcu(|current| {
            let mut next = Snapshots::clone(current);
            next.insert(quiz.id.clone(), Arc::clone(&quiz));
            next
        });
        tracing::debug!(quiz = %quiz.id, sections = quiz.sections.len(), "installed quiz snapshot");
        quiz
    }

    /// Parse a full-quiz response body and install it; returns the quiz id.
    pub fn ingest_json(&self, body: &str) -> Result<String, QuizError> {
        let quiz: Quiz = serde_json::from_str(body).map_err(QuizError::Snapshot)?;
        let id = quiz.id.clone();
        self.insert(quiz);
        Ok(id)
    }

    /// Snapshot currently installed under `id`.
    pub fn get(&self, id: &str) -> Option<Arc<Quiz>> {
        self.snapshots.load().get(id).cloned()
    }

    /// Like [`QuizStore::get`], reporting a missing quiz as gone.
    pub fn require(&self, id: &str) -> Result<Arc<Quiz>, QuizError> {
        self.get(id).ok_or_else(|| {
            tracing::warn!(quiz = id, "quiz snapshot not available");
            QuizError::NotFound(Lookup::Quiz(id.to_string()))
        })
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.snapshots.load().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.snapshots.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
