use serde::{Deserialize, Serialize};

/// Knobs for the generated preview document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Where each item form posts its answer.
    pub check_action: String,
    /// Text of every submit button.
    pub submit_label: String,
    /// Prefix of the per-item result frame names.
    pub frame_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            check_action: "/check".into(),
            submit_label: "Check".into(),
            frame_prefix: "result".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: RenderOptions =
            serde_json::from_str(r#"{ "check_action": "http://localhost:9000/check" }"#).unwrap();
        assert_eq!(options.check_action, "http://localhost:9000/check");
        assert_eq!(options.submit_label, "Check");
        assert_eq!(options.frame_prefix, "result");
    }
}
