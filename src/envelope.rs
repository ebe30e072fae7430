// src/envelope.rs
//
// The styling envelope around a converted body:
//
//   <body id="marked-popup">
//   <style>
//   {css}
//   </style>
//   {body}
//   </body>

use std::borrow::Cow;

/// Style sheet used when the caller does not supply one.
pub const DEFAULT_STYLE: &str = include_str!("../static/style.css");

/// `id` of the envelope's body element; the style sheet selects on it.
pub const BODY_ID: &str = "marked-popup";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    style: Cow<'static, str>,
    max_width: Option<u32>,
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope::new(DEFAULT_STYLE)
    }
}

impl Envelope {
    pub fn new(style: impl Into<Cow<'static, str>>) -> Self {
        Envelope {
            style: style.into(),
            max_width: None,
        }
    }

    /// Record the host's maximum popup width on the body element.
    pub fn with_max_width(mut self, px: u32) -> Self {
        self.max_width = Some(px);
        self
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn max_width(&self) -> Option<u32> {
        self.max_width
    }

    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + self.style.len() + 64);
        out.push_str("<body id=\"");
        out.push_str(BODY_ID);
        out.push('"');
        if let Some(px) = self.max_width {
            out.push_str(&format!(" data-max-width=\"{px}\""));
        }
        out.push_str(">\n<style>\n");
        out.push_str(&self.style);
        out.push_str("\n</style>\n");
        out.push_str(body);
        out.push_str("\n</body>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_style() {
        let envelope = Envelope::new("p { color: red; }");
        assert_eq!(
            envelope.wrap("<p>x</p>"),
            "<body id=\"marked-popup\">\n<style>\np { color: red; }\n</style>\n<p>x</p>\n</body>"
        );
    }

    #[test]
    fn max_width_is_recorded() {
        let envelope = Envelope::new("").with_max_width(1024);
        assert!(envelope
            .wrap("")
            .starts_with("<body id=\"marked-popup\" data-max-width=\"1024\">\n"));
    }

    #[test]
    fn default_style_styles_rules() {
        assert!(Envelope::default().style().contains(".hr"));
    }
}
