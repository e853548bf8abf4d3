use crate::spec::item::Item;

/// Interaction variant of an item, decided once from its content shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// One radio button per hint slot.
    SingleChoice,
    /// One checkbox per hint slot.
    MultiChoice,
    /// Placeholders become drop-downs listing every hint phrasing.
    FillSelect,
    /// Placeholders become free-text inputs.
    FillEnter,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::SingleChoice => "single_choice",
            ItemKind::MultiChoice => "multi_choice",
            ItemKind::FillSelect => "fill_select",
            ItemKind::FillEnter => "fill_enter",
        }
    }

    pub fn is_fill_in(&self) -> bool {
        matches!(self, ItemKind::FillSelect | ItemKind::FillEnter)
    }

    /// Whether answers arrive as typed text rather than slot indices.
    pub fn is_handwritten(&self) -> bool {
        matches!(self, ItemKind::FillEnter)
    }
}

/// First match wins: `{{` in the definition makes a fill-in item, whose
/// control depends on `hints_visible`; otherwise the solution count decides.
pub fn classify(item: &Item) -> ItemKind {
    if item.definition.text.contains("{{") {
        if item.hints_visible {
            ItemKind::FillSelect
        } else {
            ItemKind::FillEnter
        }
    } else if item.solutions.len() > 1 {
        ItemKind::MultiChoice
    } else {
        ItemKind::SingleChoice
    }
}
