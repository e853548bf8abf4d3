#![allow(missing_docs)]

pub mod check;
pub mod classify;
pub mod error;
pub mod html;
pub mod markdown;
pub mod options;
pub mod placeholder;
pub mod render;
pub mod report;
pub mod spec;
pub mod store;

pub use check::{
    Answer, CheckResult, Submission, UNKNOWN_SLOT, check, check_handwritten, check_indexed,
};
pub use classify::{ItemKind, classify};
pub use error::{Lookup, QuizError};
pub use markdown::{CommonMark, Markdown};
pub use options::RenderOptions;
pub use placeholder::{has_placeholders, solution_order, substitute};
pub use render::{render_preview, render_quiz};
pub use report::{render_result, render_result_text};
pub use spec::{Item, Person, Quiz, Section, Statement, snapshot_schema};
pub use store::QuizStore;
