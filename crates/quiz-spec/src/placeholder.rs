//! `{{k}}` placeholders inside item definitions.
//!
//! `k` is 1-based and names `hints[k - 1]`. The left-to-right order of the
//! placeholders is the authoritative answer order of a fill-in item.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Lookup, QuizError};
use crate::html::escape_html;
use crate::spec::item::Statement;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([0-9]+)\}\}").unwrap());

fn slot_of(caps: &Captures<'_>) -> Result<usize, QuizError> {
    caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .ok_or_else(|| {
            tracing::warn!(placeholder = &caps[0], "placeholder names no hint slot");
            QuizError::NotFound(Lookup::Placeholder(caps[0].to_string()))
        })
}

/// Whether `text` contains at least one well-formed placeholder.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// 0-based slot indices in the order their placeholders appear.
///
/// Empty when the text carries no placeholder.
pub fn solution_order(text: &str) -> Result<Vec<usize>, QuizError> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| slot_of(&caps))
        .collect()
}

/// Replaces every placeholder with `control(slot)` followed by a greyed echo
/// of the slot's canonical text.
///
/// Text without placeholders comes back unchanged. A placeholder naming a
/// missing or empty slot fails with [`QuizError::NotFound`].
pub fn substitute<F>(text: &str, hints: &[Vec<Statement>], mut control: F) -> Result<String, QuizError>
where
    F: FnMut(usize) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let slot = slot_of(&caps)?;
        let canonical = hints
            .get(slot)
            .and_then(|alternatives| alternatives.first())
            .ok_or_else(|| {
                tracing::warn!(slot, "placeholder refers to a missing hint slot");
                QuizError::NotFound(Lookup::Slot(slot))
            })?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(&control(slot));
        out.push_str(&format!(
            "<span class=\"gray\">({})</span>",
            escape_html(&canonical.text)
        ));
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}
