use handlebars::Handlebars;
use serde_json::{Value, json};

use crate::{check::CheckResult, error::QuizError};

const RESULT_TEMPLATE: &str = include_str!("../templates/result.hbs");

/// Pairs expected slots with submitted answers position by position; the
/// shorter side leaves empty cells.
fn rows(result: &CheckResult) -> Vec<Value> {
    let count = result.expected.len().max(result.answers.len());
    (0..count)
        .map(|index| {
            json!({
                "expected": result.expected.get(index).cloned().unwrap_or_default(),
                "answer": result.answers.get(index),
            })
        })
        .collect()
}

/// Render a check result as the HTML fragment shown in an item's result frame.
pub fn render_result(result: &CheckResult) -> Result<String, QuizError> {
    let data = json!({ "rows": rows(result) });
    Ok(Handlebars::new().render_template(RESULT_TEMPLATE, &data)?)
}

/// Render a check result as plain text, one line per position.
pub fn render_result_text(result: &CheckResult) -> String {
    let count = result.expected.len().max(result.answers.len());
    let mut lines = Vec::with_capacity(count + 1);
    for index in 0..count {
        let accepted = result
            .expected
            .get(index)
            .map(|texts| texts.join(" | "))
            .unwrap_or_default();
        let line = match result.answers.get(index) {
            Some(answer) => format!(
                "{} {} (expected: {})",
                if answer.correct { "[ok]" } else { "[x]" },
                answer.text,
                accepted
            ),
            None => format!("[ ] <no answer> (expected: {})", accepted),
        };
        lines.push(line);
    }
    lines.push(format!(
        "Result: {}",
        if result.is_correct() { "correct" } else { "incorrect" }
    ));
    lines.join("\n")
}
