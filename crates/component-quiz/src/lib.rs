use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_spec::{
    CommonMark, QuizError, QuizStore, RenderOptions, Submission, check, render_quiz, render_result,
};

const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("malformed form data: {0}")]
    FormData(#[source] serde_urlencoded::de::Error),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl ComponentError {
    pub fn status(&self) -> u16 {
        match self {
            ComponentError::ConfigParse(_) => 500,
            ComponentError::FormData(_) => 400,
            ComponentError::Quiz(err) => err.status(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ComponentConfig {
    #[serde(default)]
    pub render: RenderOptions,
}

impl ComponentConfig {
    /// Parses a JSON config document; blank input means defaults.
    pub fn from_json(config_json: &str) -> Result<Self, ComponentError> {
        if config_json.trim().is_empty() {
            Ok(Self::default())
        } else {
            serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)
        }
    }
}

/// What the transport layer should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: HTML,
            body,
        }
    }
}

/// URL-encoded request parameters, repeated keys kept in order.
#[derive(Debug, Default)]
struct Params(Vec<(String, String)>);

impl Params {
    fn parse(encoded: &str) -> Result<Self, ComponentError> {
        serde_urlencoded::from_str(encoded)
            .map(Params)
            .map_err(ComponentError::FormData)
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .collect()
    }

    fn require(&self, key: &str) -> Result<&str, ComponentError> {
        self.first(key)
            .ok_or_else(|| QuizError::bad_request(format!("missing '{key}' parameter")).into())
    }
}

fn respond(result: Result<String, ComponentError>) -> Response {
    match result {
        Ok(body) => Response::html(body),
        Err(err) => {
            tracing::debug!(status = err.status(), error = %err, "request rejected");
            Response {
                status: err.status(),
                content_type: TEXT,
                body: err.to_string(),
            }
        }
    }
}

/// Preview and check entry points over a shared quiz store.
#[derive(Debug, Clone)]
pub struct PreviewComponent {
    store: Arc<QuizStore>,
    options: RenderOptions,
}

impl PreviewComponent {
    pub fn new(store: Arc<QuizStore>) -> Self {
        Self::with_options(store, RenderOptions::default())
    }

    pub fn with_options(store: Arc<QuizStore>, options: RenderOptions) -> Self {
        Self { store, options }
    }

    pub fn from_config(store: Arc<QuizStore>, config_json: &str) -> Result<Self, ComponentError> {
        let config = ComponentConfig::from_json(config_json)?;
        Ok(Self::with_options(store, config.render))
    }

    pub fn store(&self) -> &QuizStore {
        &self.store
    }

    /// `GET /preview?qid=..`: the whole quiz as an HTML document.
    pub fn preview(&self, query: &str) -> Response {
        respond(self.preview_document(query))
    }

    /// `POST /check` with `qid`, `ssc`, `isc` and `sol` or `answer` values:
    /// the scored answer as an HTML fragment.
    pub fn check(&self, body: &str) -> Response {
        respond(self.check_fragment(body))
    }

    fn preview_document(&self, query: &str) -> Result<String, ComponentError> {
        let params = Params::parse(query)?;
        let quiz = self.store.require(params.require("qid")?)?;
        Ok(render_quiz(&quiz, &CommonMark, &self.options)?)
    }

    fn check_fragment(&self, body: &str) -> Result<String, ComponentError> {
        let params = Params::parse(body)?;
        let qid = params.require("qid")?;
        let ssc = params.require("ssc")?;
        let isc = params.require("isc")?;
        let sol = params.all("sol");
        let answer = params.all("answer");
        if sol.is_empty() && answer.is_empty() {
            return Err(QuizError::bad_request("missing 'sol' or 'answer' parameter").into());
        }

        let quiz = self.store.require(qid)?;
        let item = quiz.item(ssc, isc)?;
        let submission = Submission::for_item(item, sol, answer)?;
        let result = check(&quiz, ssc, isc, &submission)?;
        tracing::debug!(
            quiz = qid,
            section = ssc,
            item = isc,
            correct = result.is_correct(),
            "answer checked"
        );
        Ok(render_result(&result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const QUIZ: &str = r#"{
        "id": "Q2",
        "title": "",
        "intro": "",
        "sections": [{
            "sc": "s1",
            "title": "",
            "intro": "",
            "items": [
                {
                    "sc": "sinchoice",
                    "intro": "",
                    "definition": { "text": "sinchoice **definition**" },
                    "hints": [
                        [{ "text": "sinchoice hint 1" }],
                        [{ "text": "sinchoice hint 2" }],
                        [{ "text": "sinchoice hint 3" }]
                    ],
                    "hintsVisible": true,
                    "solutions": [1]
                },
                {
                    "sc": "fillent",
                    "intro": "",
                    "definition": { "text": "fillent {{2}} {{3}} {{1}}" },
                    "hints": [
                        [{ "text": "fillent hint 1" }, { "text": "fillent hint 1 alt" }],
                        [{ "text": "fillent hint 2" }],
                        [{ "text": "fillent hint 3" }]
                    ],
                    "hintsVisible": false,
                    "solutions": []
                }
            ]
        }]
    }"#;

    fn component() -> PreviewComponent {
        let store = Arc::new(QuizStore::new());
        store.ingest_json(QUIZ).expect("ingest");
        PreviewComponent::new(store)
    }

    #[test]
    fn preview_renders_known_quiz() {
        let response = component().preview("qid=Q2");
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, HTML);
        assert!(response.body.contains("<h1>Q2</h1>"));
    }

    #[test]
    fn preview_status_codes() {
        let component = component();
        assert_eq!(component.preview("qid=xyz").status, 410);
        assert_eq!(component.preview("").status, 400);
        assert_eq!(component.preview("other=1").status, 400);
    }

    #[test]
    fn check_correct_single_choice() {
        let response = component().check("qid=Q2&ssc=s1&isc=sinchoice&sol=1");
        assert_eq!(response.status, 200);
        assert_eq!(response.body.matches("<tr>").count(), 1);
        assert!(response.body.contains("<div class=\"neutral\">sinchoice hint 2</div>"));
        assert!(response.body.contains("<div class=\"correct\">sinchoice hint 2</div>"));
    }

    #[test]
    fn check_wrong_single_choice() {
        let response = component().check("qid=Q2&ssc=s1&isc=sinchoice&sol=2");
        assert_eq!(response.status, 200);
        assert!(response.body.contains("<div class=\"neutral\">sinchoice hint 2</div>"));
        assert!(response.body.contains("<div class=\"incorrect\">sinchoice hint 3</div>"));
    }

    #[test]
    fn check_routes_typed_answers() {
        let response = component().check(
            "qid=Q2&ssc=s1&isc=fillent&answer=fillent+hint+2&answer=fillent%20Hint%20%203%20&answer=FILLENT+hint+1+alt",
        );
        assert_eq!(response.status, 200);
        assert_eq!(response.body.matches("class=\"correct\"").count(), 3);
        assert!(!response.body.contains("class=\"incorrect\""));
    }

    #[test]
    fn check_status_codes() {
        let component = component();
        assert_eq!(component.check("ssc=s1&isc=sinchoice&sol=1").status, 400);
        assert_eq!(component.check("qid=Q2&ssc=s1&isc=sinchoice").status, 400);
        assert_eq!(component.check("qid=Q2&ssc=s1&isc=sinchoice&sol=one").status, 400);
        assert_eq!(component.check("qid=Q2&ssc=s1&isc=fillent&sol=1").status, 400);
        assert_eq!(component.check("qid=Q9&ssc=s1&isc=sinchoice&sol=1").status, 410);
        assert_eq!(component.check("qid=Q2&ssc=s9&isc=sinchoice&sol=1").status, 410);
        assert_eq!(component.check("qid=Q2&ssc=s1&isc=nope&sol=1").status, 410);
    }

    #[test]
    fn config_sets_form_action() {
        let store = Arc::new(QuizStore::new());
        store.ingest_json(QUIZ).expect("ingest");
        let component = PreviewComponent::from_config(
            store,
            r#"{ "render": { "check_action": "http://localhost:10000/check" } }"#,
        )
        .expect("config");
        let response = component.preview("qid=Q2");
        assert!(response.body.contains("action=\"http://localhost:10000/check\""));
    }

    #[test]
    fn blank_config_means_defaults() {
        let config = ComponentConfig::from_json("  ").expect("config");
        assert_eq!(config.render, RenderOptions::default());
        let err = ComponentConfig::from_json("{").expect_err("bad json");
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn snapshot_replacement_is_visible_to_later_requests() {
        let component = component();
        let before = component.preview("qid=Q2").body;
        component
            .store()
            .ingest_json(r#"{ "id": "Q2", "title": "renamed" }"#)
            .expect("ingest");
        let after = component.preview("qid=Q2").body;
        assert_ne!(before, after);
        assert!(after.contains("<h2>renamed</h2>"));
        assert_eq!(component.check("qid=Q2&ssc=s1&isc=sinchoice&sol=1").status, 410);
    }
}
