use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::{ItemKind, classify};

/// Smallest unit of displayable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Statement {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Statement {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}

/// A single quiz item.
///
/// `hints` holds one entry per slot; each slot lists the accepted phrasings,
/// the first of which is the canonical display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub sc: String,
    #[serde(default)]
    pub intro: String,
    pub definition: Statement,
    #[serde(default)]
    pub hints: Vec<Vec<Statement>>,
    #[serde(default)]
    pub hints_visible: bool,
    #[serde(default)]
    pub solutions: BTreeSet<usize>,
}

impl Item {
    /// Interaction variant inferred from the item's content shape.
    pub fn kind(&self) -> ItemKind {
        classify(self)
    }

    /// Accepted phrasings of a slot, if the slot exists.
    pub fn alternatives(&self, slot: usize) -> Option<&[Statement]> {
        self.hints.get(slot).map(Vec::as_slice)
    }

    /// Canonical display text of a slot.
    pub fn canonical(&self, slot: usize) -> Option<&str> {
        self.alternatives(slot)
            .and_then(|alternatives| alternatives.first())
            .map(|statement| statement.text.as_str())
    }
}
