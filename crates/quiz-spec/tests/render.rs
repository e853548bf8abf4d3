use pretty_assertions::assert_eq;

use quiz_spec::{
    CommonMark, ItemKind, Quiz, RenderOptions, Section, render_preview, render_quiz,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "preview_quiz" => include_str!("../tests/fixtures/preview_quiz.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn quiz() -> Quiz {
    serde_json::from_str(fixture("preview_quiz")).expect("deserialize")
}

/// Text of each `<section>` element, in document order.
fn sections(html: &str) -> Vec<&str> {
    html.split("<section>")
        .skip(1)
        .map(|rest| rest.split("</section>").next().unwrap_or_default())
        .collect()
}

/// Text of each item `<form>`, in document order.
fn forms(html: &str) -> Vec<&str> {
    html.split("<form class=\"item\"")
        .skip(1)
        .map(|rest| rest.split("</form>").next().unwrap_or_default())
        .collect()
}

#[test]
fn fixture_classifies_every_variant() {
    let quiz = quiz();
    let kinds: Vec<ItemKind> = quiz
        .sections
        .iter()
        .flat_map(|section| section.items.iter().map(|item| item.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ItemKind::SingleChoice,
            ItemKind::FillSelect,
            ItemKind::MultiChoice,
            ItemKind::FillEnter,
        ]
    );
}

#[test]
fn document_has_quiz_header_and_rendered_intro() {
    let html = render_preview(&quiz()).expect("render");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Q2</title>"));
    assert!(html.contains("<h1>Q2</h1>\n<h2>Preview quiz</h2>\n<p>quiz <strong>intro</strong></p>"));
    assert!(html.contains("function resizeFrame(frame)"));
}

#[test]
fn sections_hold_rule_title_intro_and_forms() {
    let html = render_preview(&quiz()).expect("render");
    let sections = sections(&html);
    assert_eq!(sections.len(), 3);
    assert!(sections[0].starts_with(
        "\n<hr class=\"solid\"/>\n<h3>sec1 title</h3>\n<p>sec1 <strong>intro</strong></p>"
    ));

    let form_counts: Vec<usize> = sections.iter().map(|s| forms(s).len()).collect();
    assert_eq!(form_counts, vec![2, 2, 0]);
}

#[test]
fn every_form_carries_its_identity_and_one_submit() {
    let quiz = quiz();
    let html = render_preview(&quiz).expect("render");
    let rendered = forms(&html);
    let items: Vec<(&Section, &str)> = quiz
        .sections
        .iter()
        .flat_map(|section| section.items.iter().map(move |item| (section, item.sc.as_str())))
        .collect();
    assert_eq!(rendered.len(), items.len());

    for (form, (section, item_sc)) in rendered.iter().zip(items) {
        assert_eq!(form.matches("type=\"hidden\"").count(), 3);
        assert!(form.contains("<input type=\"hidden\" name=\"qid\" value=\"Q2\"/>"));
        assert!(form.contains(&format!(
            "<input type=\"hidden\" name=\"ssc\" value=\"{}\"/>",
            section.sc
        )));
        assert!(form.contains(&format!(
            "<input type=\"hidden\" name=\"isc\" value=\"{item_sc}\"/>"
        )));
        assert_eq!(form.matches("type=\"submit\"").count(), 1);
        assert!(form.contains(&format!("target=\"result-Q2-{}-{item_sc}\"", section.sc)));
    }
}

#[test]
fn each_form_is_followed_by_its_result_frame() {
    let html = render_preview(&quiz()).expect("render");
    assert_eq!(html.matches("<iframe ").count(), 4);
    assert!(html.contains("</form>\n<iframe name=\"result-Q2-s2-fillent\""));
}

#[test]
fn choice_items_list_one_input_per_slot() {
    let html = render_preview(&quiz()).expect("render");
    let rendered = forms(&html);
    let single = rendered[0];
    assert!(single.contains("<p>sinchoice <strong>definition</strong></p>"));
    assert_eq!(single.matches("type=\"radio\"").count(), 3);
    assert!(single.contains("<label for=\"Q2-s1-sinchoice-2\">sinchoice hint 3</label>"));

    let multi = rendered[2];
    assert_eq!(multi.matches("type=\"checkbox\"").count(), 3);
    assert!(multi.contains("id=\"Q2-s2-mulchoice-0\" name=\"sol\" value=\"0\""));
}

#[test]
fn fill_items_replace_placeholders() {
    let html = render_preview(&quiz()).expect("render");
    let rendered = forms(&html);

    let select = rendered[1];
    assert_eq!(select.matches("<select name=\"sol\">").count(), 3);
    assert_eq!(select.matches("<option ").count(), 9);
    assert!(select.contains("<span class=\"gray\">(fillsel hint 2)</span>"));
    assert!(!select.contains("{{"));

    let enter = rendered[3];
    assert_eq!(enter.matches("<input type=\"text\" name=\"answer\"/>").count(), 3);
    let echoes: Vec<&str> = enter
        .match_indices("<span class=\"gray\">(")
        .map(|(at, _)| &enter[at..])
        .map(|rest| rest.split(')').next().unwrap_or_default())
        .collect();
    assert_eq!(
        echoes,
        vec![
            "<span class=\"gray\">(fillent hint 2",
            "<span class=\"gray\">(fillent hint 3",
            "<span class=\"gray\">(fillent hint 1",
        ]
    );
}

#[test]
fn empty_quiz_still_opens() {
    let html = render_preview(&Quiz::new("Q1", "", "")).expect("render");
    assert!(html.contains("<h1>Q1</h1>"));
    assert!(!html.contains("<section>"));
}

#[test]
fn custom_markdown_and_options_are_honoured() {
    let shout = |text: &str| format!("<div>{}</div>", text.to_uppercase());
    let options = RenderOptions {
        submit_label: "Verify".into(),
        ..RenderOptions::default()
    };
    let html = render_quiz(&quiz(), &shout, &options).expect("render");
    assert!(html.contains("<div>QUIZ **INTRO**</div>"));
    assert_eq!(html.matches("<button type=\"submit\">Verify</button>").count(), 4);

    let plain = render_quiz(&quiz(), &CommonMark, &RenderOptions::default()).expect("render");
    assert_eq!(plain, render_preview(&quiz()).expect("render"));
}
