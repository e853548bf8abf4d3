use std::fmt;

use thiserror::Error;

/// What failed to resolve inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Quiz(String),
    Section(String),
    Item(String),
    /// Hint slot referenced by a placeholder or a solution index.
    Slot(usize),
    /// Placeholder whose number does not name any slot, e.g. `{{0}}`.
    Placeholder(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Quiz(id) => write!(f, "quiz '{id}'"),
            Lookup::Section(sc) => write!(f, "section '{sc}'"),
            Lookup::Item(sc) => write!(f, "item '{sc}'"),
            Lookup::Slot(slot) => write!(f, "hint slot {slot}"),
            Lookup::Placeholder(marker) => write!(f, "placeholder {marker}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{0} is gone")]
    NotFound(Lookup),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("failed to parse quiz snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
    #[error("result template failed: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl QuizError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        QuizError::BadRequest(message.into())
    }

    /// HTTP status the transport boundary reports for this error.
    pub fn status(&self) -> u16 {
        match self {
            QuizError::NotFound(_) => 410,
            QuizError::BadRequest(_) | QuizError::Snapshot(_) => 400,
            QuizError::Template(_) => 500,
        }
    }
}
