// src/markup.rs
//
// Markup kinds and the renderer each one maps to. Renderers are black boxes
// producing HTML; their output goes through `html_to_dialect` afterwards.

use crate::error::{Error, Result};
use pulldown_cmark::{html, Options, Parser};
use std::fmt;
use std::str::FromStr;

/// Turns marked-up text into an HTML fragment.
pub type Renderer = fn(&str) -> Result<String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkupKind {
    #[default]
    Plain,
    Markdown,
    ReStructuredText,
}

impl MarkupKind {
    pub const ALL: [MarkupKind; 3] = [
        MarkupKind::Plain,
        MarkupKind::Markdown,
        MarkupKind::ReStructuredText,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MarkupKind::Plain => "plain",
            MarkupKind::Markdown => "markdown",
            MarkupKind::ReStructuredText => "reStructuredText",
        }
    }

    /// Identifiers accepted by [`FromStr`], in declaration order.
    pub fn names() -> [&'static str; 3] {
        Self::ALL.map(MarkupKind::as_str)
    }

    pub fn renderer(self) -> Renderer {
        match self {
            MarkupKind::Plain => render_plain,
            MarkupKind::Markdown => render_markdown,
            MarkupKind::ReStructuredText => render_rst,
        }
    }

    pub fn render(self, text: &str) -> Result<String> {
        (self.renderer())(text)
    }
}

impl FromStr for MarkupKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownMarkupKind {
                given: s.to_owned(),
            })
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_plain(text: &str) -> Result<String> {
    Ok(text.to_owned())
}

fn render_markdown(text: &str) -> Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Ok(out)
}

fn render_rst(text: &str) -> Result<String> {
    let render_error = |message: String| Error::Render {
        kind: MarkupKind::ReStructuredText,
        message,
    };

    let document = rst_parser::parse(text).map_err(|e| render_error(e.to_string()))?;
    let mut buf = Vec::with_capacity(text.len() * 2);
    rst_renderer::render_html(&document, &mut buf, false)
        .map_err(|e| render_error(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| render_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_identifiers() {
        assert_eq!("plain".parse::<MarkupKind>(), Ok(MarkupKind::Plain));
        assert_eq!("markdown".parse::<MarkupKind>(), Ok(MarkupKind::Markdown));
        assert_eq!(
            "reStructuredText".parse::<MarkupKind>(),
            Ok(MarkupKind::ReStructuredText)
        );
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        assert_eq!(
            "Markdown".parse::<MarkupKind>(),
            Err(Error::UnknownMarkupKind {
                given: "Markdown".to_owned()
            })
        );
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for kind in MarkupKind::ALL {
            assert_eq!(kind.to_string().parse::<MarkupKind>(), Ok(kind));
        }
    }

    #[test]
    fn plain_is_identity() {
        assert_eq!(MarkupKind::Plain.render("a  <b>\n").unwrap(), "a  <b>\n");
    }

    #[test]
    fn markdown_renders_code_block_as_pre() {
        let html = MarkupKind::Markdown.render("```\na  b\n```\n").unwrap();
        assert_eq!(html, "<pre><code>a  b\n</code></pre>\n");
    }
}
