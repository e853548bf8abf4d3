use pulldown_cmark::{Parser, html};

/// Markdown-to-HTML seam used for every prose field of a quiz.
pub trait Markdown {
    fn render(&self, markdown: &str) -> String;
}

/// Plain CommonMark rendering without extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl Markdown for CommonMark {
    fn render(&self, markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new(markdown));
        out
    }
}

impl<F> Markdown for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}
