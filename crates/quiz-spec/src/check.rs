use std::collections::BTreeSet;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::{
    error::{Lookup, QuizError},
    placeholder::solution_order,
    spec::{Item, Quiz},
};

/// Display text for a submitted index that names no slot.
pub const UNKNOWN_SLOT: &str = "(unknown)";

/// One scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub correct: bool,
}

impl Answer {
    fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

/// Per-answer breakdown of a check.
///
/// `expected` lists, per authoritative slot, every accepted phrasing;
/// `answers` follows submission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckResult {
    pub expected: Vec<Vec<String>>,
    pub answers: Vec<Answer>,
}

impl CheckResult {
    pub fn is_correct(&self) -> bool {
        self.answers.iter().all(|answer| answer.correct)
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckResult", 3)?;
        state.serialize_field("expected", &self.expected)?;
        state.serialize_field("answers", &self.answers)?;
        state.serialize_field("isCorrect", &self.is_correct())?;
        state.end()
    }
}

/// Answers as submitted by the preview form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Slot indices from radio buttons, checkboxes, or drop-downs.
    Indexed(Vec<usize>),
    /// Free text typed into fill-in inputs.
    Handwritten(Vec<String>),
}

impl Submission {
    /// Picks the submission shape the item expects from raw request values.
    ///
    /// Fill-in items with hidden hints take `answer` texts; everything else
    /// takes numeric `sol` values.
    pub fn for_item(item: &Item, sol: Vec<String>, answer: Vec<String>) -> Result<Self, QuizError> {
        if item.kind().is_handwritten() {
            if answer.is_empty() {
                return Err(QuizError::bad_request("missing 'answer' parameter"));
            }
            return Ok(Submission::Handwritten(answer));
        }
        if sol.is_empty() {
            return Err(QuizError::bad_request("missing 'sol' parameter"));
        }
        sol.iter()
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| QuizError::bad_request(format!("'sol' is not an index: {value}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Submission::Indexed)
    }
}

/// Where the correct slots of an item come from.
enum Authority<'a> {
    /// Placeholder order of a fill-in item; scored position by position.
    Sequence(Vec<usize>),
    /// `solutions` of a choice item; scored by membership.
    Set(&'a BTreeSet<usize>),
}

impl Authority<'_> {
    fn resolve(item: &Item) -> Result<Authority<'_>, QuizError> {
        let order = solution_order(&item.definition.text)?;
        if order.is_empty() {
            Ok(Authority::Set(&item.solutions))
        } else {
            Ok(Authority::Sequence(order))
        }
    }

    fn slots(&self) -> Vec<usize> {
        match self {
            Authority::Sequence(order) => order.clone(),
            Authority::Set(solutions) => solutions.iter().copied().collect(),
        }
    }

    fn accepts(&self, position: usize, slot: usize) -> bool {
        match self {
            Authority::Sequence(order) => order.get(position) == Some(&slot),
            Authority::Set(solutions) => solutions.contains(&slot),
        }
    }
}

fn expected_texts(item: &Item, slots: &[usize]) -> Result<Vec<Vec<String>>, QuizError> {
    slots
        .iter()
        .map(|&slot| match item.alternatives(slot) {
            Some(alternatives) if !alternatives.is_empty() => Ok(alternatives
                .iter()
                .map(|statement| statement.text.clone())
                .collect()),
            _ => {
                tracing::warn!(item = %item.sc, slot, "answer key refers to a missing hint slot");
                Err(QuizError::NotFound(Lookup::Slot(slot)))
            }
        })
        .collect()
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Score slot indices against an item.
///
/// Each submitted index is scored on its own; a short submission is not an
/// error. Indices outside the hint list score incorrect and display as
/// [`UNKNOWN_SLOT`].
pub fn check_indexed(
    quiz: &Quiz,
    section_sc: &str,
    item_sc: &str,
    submitted: &[usize],
) -> Result<CheckResult, QuizError> {
    let item = quiz.item(section_sc, item_sc)?;
    let authority = Authority::resolve(item)?;
    let expected = expected_texts(item, &authority.slots())?;

    tracing::debug!(
        quiz = %quiz.id,
        section = section_sc,
        item = item_sc,
        kind = item.kind().as_str(),
        submitted = submitted.len(),
        "checking indexed answer"
    );

    let answers = submitted
        .iter()
        .enumerate()
        .map(|(position, &slot)| {
            let text = item.canonical(slot).unwrap_or(UNKNOWN_SLOT);
            Answer::new(text, authority.accepts(position, slot))
        })
        .collect();

    Ok(CheckResult { expected, answers })
}

/// Score typed answers against a fill-in item.
///
/// The n-th text is compared with every phrasing of the n-th placeholder's
/// slot, ignoring case and surrounding or repeated whitespace. Texts beyond
/// the last placeholder score incorrect.
pub fn check_handwritten<S: AsRef<str>>(
    quiz: &Quiz,
    section_sc: &str,
    item_sc: &str,
    submitted: &[S],
) -> Result<CheckResult, QuizError> {
    let item = quiz.item(section_sc, item_sc)?;
    let order = solution_order(&item.definition.text)?;
    let expected = expected_texts(item, &order)?;

    tracing::debug!(
        quiz = %quiz.id,
        section = section_sc,
        item = item_sc,
        placeholders = order.len(),
        submitted = submitted.len(),
        "checking handwritten answer"
    );

    let answers = submitted
        .iter()
        .enumerate()
        .map(|(position, text)| {
            let text = text.as_ref().trim();
            let wanted = normalize(text);
            let correct = expected
                .get(position)
                .is_some_and(|accepted| accepted.iter().any(|alt| normalize(alt) == wanted));
            Answer::new(text, correct)
        })
        .collect();

    Ok(CheckResult { expected, answers })
}

/// Dispatch a submission to the matching checker.
pub fn check(
    quiz: &Quiz,
    section_sc: &str,
    item_sc: &str,
    submission: &Submission,
) -> Result<CheckResult, QuizError> {
    match submission {
        Submission::Indexed(indices) => {
            check_indexed(quiz, section_sc, item_sc, indices.as_slice())
        }
        Submission::Handwritten(texts) => {
            check_handwritten(quiz, section_sc, item_sc, texts.as_slice())
        }
    }
}
