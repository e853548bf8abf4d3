use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Lookup, QuizError};
use crate::spec::item::Item;

/// Author, inspector, or reviewer reference carried by a full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Ordered group of items with its own title and intro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    pub sc: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    pub fn item(&self, sc: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.sc == sc)
    }
}

/// Immutable full-quiz snapshot.
///
/// Review bookkeeping (`curator`, `authors`, approvals, `state`) is kept so a
/// snapshot survives a round trip, but preview and checking never read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curator: Option<Person>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Person>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inspectors: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub readiness_signs: Vec<Person>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approvals: Vec<Person>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disapprovals: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsolete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Quiz {
    /// Bare snapshot with no review bookkeeping.
    pub fn new(id: impl Into<String>, title: impl Into<String>, intro: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            intro: intro.into(),
            sections: Vec::new(),
            curator: None,
            authors: Vec::new(),
            inspectors: Vec::new(),
            recommended_length: None,
            readiness_signs: Vec::new(),
            approvals: Vec::new(),
            disapprovals: Vec::new(),
            obsolete: None,
            state: None,
        }
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn section(&self, sc: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.sc == sc)
    }

    /// Resolves an item by section and item code.
    pub fn item(&self, section_sc: &str, item_sc: &str) -> Result<&Item, QuizError> {
        let section = self
            .section(section_sc)
            .ok_or_else(|| QuizError::NotFound(Lookup::Section(section_sc.to_string())))?;
        section
            .item(item_sc)
            .ok_or_else(|| QuizError::NotFound(Lookup::Item(item_sc.to_string())))
    }
}
