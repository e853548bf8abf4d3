use crate::{
    classify::ItemKind,
    error::QuizError,
    html::escape_html,
    markdown::{CommonMark, Markdown},
    options::RenderOptions,
    placeholder::substitute,
    spec::{Item, Quiz, Section},
};

const STYLE: &str = "\
body{padding:20px}
.gray{color:#ddd}
ul{list-style-type:none}
input[type='text']{border-style:solid;border-width:0 0 1px 0;border-color:blue}
hr.dotted{border:none;border-top:1px dashed #bbb}
hr.solid{border:none;border-top:1px solid #bbb}
iframe{border:none;width:100%;height:0}
.correct{color:green}
.incorrect{color:red}";

const RESIZE_SCRIPT: &str = "\
function resizeFrame(frame){
  try{
    var doc=frame.contentWindow.document;
    frame.style.height=doc.documentElement.scrollHeight+'px';
  }catch(e){}
}";

/// Identifies one item inside the rendered document.
struct ItemContext<'a> {
    quiz_id: &'a str,
    section_sc: &'a str,
    item: &'a Item,
}

impl ItemContext<'_> {
    fn key(&self) -> String {
        format!("{}-{}-{}", self.quiz_id, self.section_sc, self.item.sc)
    }

    fn input_id(&self, slot: usize) -> String {
        format!("{}-{}", self.key(), slot)
    }

    fn frame_name(&self, options: &RenderOptions) -> String {
        format!("{}-{}", options.frame_prefix, self.key())
    }
}

/// Render the preview document with CommonMark prose and default options.
pub fn render_preview(quiz: &Quiz) -> Result<String, QuizError> {
    render_quiz(quiz, &CommonMark, &RenderOptions::default())
}

/// Render a whole quiz snapshot as a static HTML document with one answer
/// form and one result frame per item.
pub fn render_quiz(
    quiz: &Quiz,
    markdown: &dyn Markdown,
    options: &RenderOptions,
) -> Result<String, QuizError> {
    tracing::debug!(
        quiz = %quiz.id,
        sections = quiz.sections.len(),
        "rendering quiz preview"
    );

    let mut lines = Vec::new();
    lines.push("<!DOCTYPE html>".to_string());
    lines.push("<html>".to_string());
    lines.push("<head>".to_string());
    lines.push("<meta charset=\"utf-8\"/>".to_string());
    lines.push(format!("<title>{}</title>", escape_html(&quiz.id)));
    lines.push(format!("<style>\n{STYLE}\n</style>"));
    lines.push(format!("<script>\n{RESIZE_SCRIPT}\n</script>"));
    lines.push("</head>".to_string());
    lines.push("<body>".to_string());
    lines.push(format!("<h1>{}</h1>", escape_html(&quiz.id)));
    lines.push(format!("<h2>{}</h2>", escape_html(&quiz.title)));
    lines.push(markdown.render(&quiz.intro));

    for section in &quiz.sections {
        render_section(&mut lines, quiz, section, markdown, options)?;
    }

    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    Ok(lines.join("\n"))
}

fn render_section(
    lines: &mut Vec<String>,
    quiz: &Quiz,
    section: &Section,
    markdown: &dyn Markdown,
    options: &RenderOptions,
) -> Result<(), QuizError> {
    lines.push("<section>".to_string());
    lines.push("<hr class=\"solid\"/>".to_string());
    lines.push(format!("<h3>{}</h3>", escape_html(&section.title)));
    lines.push(markdown.render(&section.intro));

    for item in &section.items {
        let ctx = ItemContext {
            quiz_id: &quiz.id,
            section_sc: &section.sc,
            item,
        };
        render_item(lines, &ctx, markdown, options)?;
    }

    lines.push("</section>".to_string());
    Ok(())
}

fn render_item(
    lines: &mut Vec<String>,
    ctx: &ItemContext<'_>,
    markdown: &dyn Markdown,
    options: &RenderOptions,
) -> Result<(), QuizError> {
    let item = ctx.item;
    let frame = escape_html(&ctx.frame_name(options));

    lines.push(format!(
        "<form class=\"item\" action=\"{}\" method=\"post\" enctype=\"application/x-www-form-urlencoded\" target=\"{}\">",
        escape_html(&options.check_action),
        frame
    ));
    lines.push("<hr class=\"dotted\"/>".to_string());
    lines.push(markdown.render(&item.intro));

    let definition = markdown.render(&item.definition.text);
    match item.kind() {
        ItemKind::SingleChoice => {
            lines.push(definition);
            lines.push(choice_list(ctx, "radio"));
        }
        ItemKind::MultiChoice => {
            lines.push(definition);
            lines.push(choice_list(ctx, "checkbox"));
        }
        ItemKind::FillSelect => {
            let select = select_control(item);
            lines.push(substitute(&definition, &item.hints, |_| select.clone())?);
        }
        ItemKind::FillEnter => {
            lines.push(substitute(&definition, &item.hints, |_| {
                "<input type=\"text\" name=\"answer\"/>".to_string()
            })?);
        }
    }

    lines.push(hidden_field("qid", ctx.quiz_id));
    lines.push(hidden_field("ssc", ctx.section_sc));
    lines.push(hidden_field("isc", &item.sc));
    lines.push(format!(
        "<button type=\"submit\">{}</button>",
        escape_html(&options.submit_label)
    ));
    lines.push("</form>".to_string());
    lines.push(format!(
        "<iframe name=\"{frame}\" class=\"result\" onload=\"resizeFrame(this)\"></iframe>"
    ));
    Ok(())
}

fn choice_list(ctx: &ItemContext<'_>, input_type: &str) -> String {
    let mut lines = vec!["<ul class=\"sol\">".to_string()];
    for slot in 0..ctx.item.hints.len() {
        let id = escape_html(&ctx.input_id(slot));
        lines.push("<li>".to_string());
        lines.push(format!(
            "<input type=\"{input_type}\" id=\"{id}\" name=\"sol\" value=\"{slot}\"/>"
        ));
        lines.push(format!(
            "<label for=\"{id}\">{}</label>",
            escape_html(ctx.item.canonical(slot).unwrap_or_default())
        ));
        lines.push("</li>".to_string());
    }
    lines.push("</ul>".to_string());
    lines.join("\n")
}

/// Drop-down offering every phrasing of every slot, valued by slot index.
fn select_control(item: &Item) -> String {
    let mut select = String::from("<select name=\"sol\">");
    for (slot, alternatives) in item.hints.iter().enumerate() {
        for alternative in alternatives {
            select.push_str(&format!(
                "<option value=\"{slot}\">{}</option>",
                escape_html(&alternative.text)
            ));
        }
    }
    select.push_str("</select>");
    select
}

fn hidden_field(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{name}\" value=\"{}\"/>",
        escape_html(value)
    )
}
