// src/tokenizer.rs
//
// Event tokenizer for already-rendered HTML fragments.
//
// - Single forward pass over the input bytes; every split point is an ASCII byte,
//   so slicing the source `str` never lands inside a UTF-8 sequence.
// - Tag and attribute names are lower-cased. Attribute values are kept as written:
//   character and entity references are not decoded.
// - Character and entity references in text are reported as their own events.
// - `script` and `style` contents are raw text up to the matching end tag.
// - Nothing is fatal: an unterminated or unclassifiable construct becomes `Text`.

use memchr::{memchr, memchr2, memmem};
use std::borrow::Cow;
use std::iter::FusedIterator;

/// One `name="value"` pair of a start or self-closing tag, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    /// `None` for a valueless attribute such as `<input disabled>`.
    pub value: Option<Cow<'a, str>>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Attribute {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// One unit of markup, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    StartTag {
        name: Cow<'a, str>,
        attributes: Vec<Attribute<'a>>,
    },
    EndTag {
        name: Cow<'a, str>,
    },
    /// XHTML-style empty tag, `<br/>`.
    SelfClosingTag {
        name: Cow<'a, str>,
        attributes: Vec<Attribute<'a>>,
    },
    Text(Cow<'a, str>),
    /// Numeric reference without the `&#` and `;`: `"62"` or `"x3E"`.
    CharacterReference(&'a str),
    /// Named reference without the `&` and `;`: `"amp"`.
    EntityReference(&'a str),
    Comment(&'a str),
    /// Everything between `<!` and `>`, including the brackets of a marked section.
    Declaration(&'a str),
    ProcessingInstruction(&'a str),
}

/* ============================ Utility predicates ========================= */

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0c'
}

#[inline]
fn is_tag_name_char(b: u8) -> bool {
    !is_ws(b) && b != b'/' && b != b'>'
}

#[inline]
fn is_attr_name_char(b: u8) -> bool {
    is_tag_name_char(b) && b != b'=' && b != b'"' && b != b'\''
}

fn lowercase(s: &str) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/* =============================== Tag parsing ============================= */

/// Parse the inside of `<...>` (without the brackets) of a start tag.
/// Returns (name, attributes, self_closing).
fn parse_start_tag(inner: &str) -> (Cow<'_, str>, Vec<Attribute<'_>>, bool) {
    let b = inner.as_bytes();
    let len = b.len();

    let mut i = 0usize;
    while i < len && is_tag_name_char(b[i]) {
        i += 1;
    }
    let name = lowercase(&inner[..i]);

    // self-closing? last non-whitespace byte is '/'
    let mut j = len;
    while j > i && is_ws(b[j - 1]) {
        j -= 1;
    }
    let self_closing = j > i && b[j - 1] == b'/';

    let mut attributes = Vec::new();
    while i < len {
        // skip whitespace and slashes
        while i < len && (is_ws(b[i]) || b[i] == b'/') {
            i += 1;
        }
        if i >= len {
            break;
        }
        if !is_attr_name_char(b[i]) {
            // Stray quoted string or '=': kept verbatim as a valueless attribute.
            let start = i;
            i = if b[i] == b'=' {
                i + 1 + b[i + 1..].iter().take_while(|&&c| is_attr_name_char(c)).count()
            } else {
                memchr(b[i], &b[i + 1..]).map_or(len, |off| i + 1 + off + 1)
            };
            attributes.push(Attribute {
                name: Cow::Borrowed(&inner[start..i]),
                value: None,
            });
            continue;
        }
        let name_start = i;
        while i < len && is_attr_name_char(b[i]) {
            i += 1;
        }
        let attr_name = lowercase(&inner[name_start..i]);

        let mut k = i;
        while k < len && is_ws(b[k]) {
            k += 1;
        }
        if k >= len || b[k] != b'=' {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        k += 1;
        while k < len && is_ws(b[k]) {
            k += 1;
        }

        let value = if k < len && (b[k] == b'"' || b[k] == b'\'') {
            let q = b[k];
            let start = k + 1;
            let end = memchr(q, &b[start..]).map_or(len, |off| start + off);
            i = (end + 1).min(len);
            &inner[start..end]
        } else {
            let start = k;
            while k < len && !is_ws(b[k]) {
                k += 1;
            }
            i = k;
            &inner[start..k]
        };
        attributes.push(Attribute {
            name: attr_name,
            value: Some(Cow::Borrowed(value)),
        });
    }

    (name, attributes, self_closing)
}

/* ================================ Tokenizer ============================== */

/// Lazy iterator of [`Event`]s over an HTML fragment.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    raw_text: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Tokenizer {
            src,
            pos: 0,
            raw_text: None,
        }
    }

    /// Emit text from `start` up to the next '<' or '&' found at or after `from`.
    fn text(&mut self, start: usize, from: usize) -> Event<'a> {
        let s = self.src.as_bytes();
        let end = memchr2(b'<', b'&', &s[from..]).map_or(s.len(), |off| from + off);
        self.pos = end;
        Event::Text(Cow::Borrowed(&self.src[start..end]))
    }

    /// Everything from `start` to the end of input as literal text.
    fn rest_as_text(&mut self, start: usize) -> Event<'a> {
        self.pos = self.src.len();
        Event::Text(Cow::Borrowed(&self.src[start..]))
    }

    /// Consume raw text until the matching `</name`. `None` if there is no content.
    fn raw_text_until_end(&mut self, name: &str) -> Option<Event<'a>> {
        let s = self.src.as_bytes();
        let n = s.len();
        let start = self.pos;
        let mut j = start;
        let end = loop {
            let Some(p) = memchr(b'<', &s[j..]).map(|off| j + off) else {
                break n;
            };
            let name_end = p + 2 + name.len();
            if name_end <= n
                && s[p + 1] == b'/'
                && s[p + 2..name_end].eq_ignore_ascii_case(name.as_bytes())
                && (name_end == n || !is_tag_name_char(s[name_end]))
            {
                break p;
            }
            j = p + 1;
        };
        self.pos = end;
        (end > start).then(|| Event::Text(Cow::Borrowed(&self.src[start..end])))
    }

    fn markup(&mut self, i: usize) -> Event<'a> {
        let s = self.src.as_bytes();
        let rest = &s[i..];

        if rest.starts_with(b"<!--") {
            return match memmem::find(&s[i + 4..], b"-->") {
                Some(off) => {
                    let end = i + 4 + off;
                    self.pos = end + 3;
                    Event::Comment(&self.src[i + 4..end])
                }
                None => self.rest_as_text(i),
            };
        }

        if rest.starts_with(b"<![") {
            return match memmem::find(&s[i + 3..], b"]>") {
                Some(off) => {
                    let close = i + 3 + off + 1;
                    self.pos = close + 1;
                    Event::Declaration(&self.src[i + 2..close])
                }
                None => self.rest_as_text(i),
            };
        }

        if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
            return match memchr(b'>', &s[i + 2..]) {
                Some(off) => {
                    let end = i + 2 + off;
                    self.pos = end + 1;
                    let body = &self.src[i + 2..end];
                    if s[i + 1] == b'!' {
                        Event::Declaration(body)
                    } else {
                        Event::ProcessingInstruction(body)
                    }
                }
                None => self.rest_as_text(i),
            };
        }

        let is_end = rest.len() > 2 && rest[1] == b'/' && rest[2].is_ascii_alphabetic();
        let is_start = rest.len() > 1 && rest[1].is_ascii_alphabetic();
        if !is_end && !is_start {
            // literal '<'
            return self.text(i, i + 1);
        }

        let Some(j) = find_tag_end(s, i) else {
            return self.rest_as_text(i);
        };
        self.pos = j + 1;

        if is_end {
            let inner = &self.src[i + 2..j];
            let len = inner
                .bytes()
                .position(|b| !is_tag_name_char(b))
                .unwrap_or(inner.len());
            return Event::EndTag {
                name: lowercase(&inner[..len]),
            };
        }

        let (name, attributes, self_closing) = parse_start_tag(&self.src[i + 1..j]);
        if self_closing {
            return Event::SelfClosingTag { name, attributes };
        }
        self.raw_text = match &*name {
            "script" => Some("script"),
            "style" => Some("style"),
            _ => None,
        };
        Event::StartTag { name, attributes }
    }

    fn reference(&mut self, i: usize) -> Event<'a> {
        let s = self.src.as_bytes();
        let n = s.len();

        if i + 1 < n && s[i + 1] == b'#' {
            let hex = i + 2 < n && (s[i + 2] == b'x' || s[i + 2] == b'X');
            let digits_start = if hex { i + 3 } else { i + 2 };
            let mut k = digits_start;
            while k < n && (if hex { s[k].is_ascii_hexdigit() } else { s[k].is_ascii_digit() }) {
                k += 1;
            }
            if k > digits_start && k < n && s[k] == b';' {
                self.pos = k + 1;
                return Event::CharacterReference(&self.src[i + 2..k]);
            }
            return self.text(i, i + 1);
        }

        if i + 1 < n && s[i + 1].is_ascii_alphabetic() {
            let mut k = i + 1;
            while k < n && s[k].is_ascii_alphanumeric() {
                k += 1;
            }
            if k < n && s[k] == b';' {
                self.pos = k + 1;
                return Event::EntityReference(&self.src[i + 1..k]);
            }
        }

        // literal '&'
        self.text(i, i + 1)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        if let Some(name) = self.raw_text.take() {
            if let Some(text) = self.raw_text_until_end(name) {
                return Some(text);
            }
        }

        let i = self.pos;
        let b = *self.src.as_bytes().get(i)?;
        Some(match b {
            b'<' => self.markup(i),
            b'&' => self.reference(i),
            _ => self.text(i, i),
        })
    }
}

impl FusedIterator for Tokenizer<'_> {}

/* ================================== Tests ================================ */

#[cfg(test)]
mod tests {
    use super::*;

    fn events(src: &str) -> Vec<Event<'_>> {
        Tokenizer::new(src).collect()
    }

    fn text(s: &str) -> Event<'_> {
        Event::Text(Cow::Borrowed(s))
    }

    fn start<'a>(name: &'a str, attributes: Vec<Attribute<'a>>) -> Event<'a> {
        Event::StartTag {
            name: Cow::Borrowed(name),
            attributes,
        }
    }

    fn end(name: &str) -> Event<'_> {
        Event::EndTag {
            name: Cow::Borrowed(name),
        }
    }

    #[test]
    fn empty_input_has_no_events() {
        assert!(events("").is_empty());
    }

    #[test]
    fn tags_and_text() {
        assert_eq!(
            events("<p>hello</p>"),
            vec![start("p", vec![]), text("hello"), end("p")]
        );
    }

    #[test]
    fn names_are_lowercased_values_kept() {
        assert_eq!(
            events(r#"<A HREF="Http://X">"#),
            vec![start("a", vec![Attribute::new("href", "Http://X")])]
        );
    }

    #[test]
    fn attribute_forms() {
        assert_eq!(
            events(r#"<input type=text disabled value='a"b' data-x = "1">"#),
            vec![start(
                "input",
                vec![
                    Attribute::new("type", "text"),
                    Attribute {
                        name: Cow::Borrowed("disabled"),
                        value: None,
                    },
                    Attribute::new("value", "a\"b"),
                    Attribute::new("data-x", "1"),
                ]
            )]
        );
    }

    #[test]
    fn stray_tokens_are_kept_verbatim() {
        let valueless = |name| Attribute {
            name: Cow::Borrowed(name),
            value: None,
        };
        assert_eq!(
            events(r#"<a "x" ='y' =z>"#),
            vec![start(
                "a",
                vec![valueless("\"x\""), valueless("="), valueless("'y'"), valueless("=z")]
            )]
        );
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        assert_eq!(
            events(r#"<a title="x>y">z"#),
            vec![start("a", vec![Attribute::new("title", "x>y")]), text("z")]
        );
    }

    #[test]
    fn self_closing_is_distinguished() {
        assert_eq!(
            events("<hr /><HR/><hr>"),
            vec![
                Event::SelfClosingTag {
                    name: Cow::Borrowed("hr"),
                    attributes: vec![]
                },
                Event::SelfClosingTag {
                    name: Cow::Borrowed("hr"),
                    attributes: vec![]
                },
                start("hr", vec![]),
            ]
        );
    }

    #[test]
    fn references_are_reported_not_decoded() {
        assert_eq!(
            events("a&amp;b&#62;&#x3E;"),
            vec![
                text("a"),
                Event::EntityReference("amp"),
                text("b"),
                Event::CharacterReference("62"),
                Event::CharacterReference("x3E"),
            ]
        );
    }

    #[test]
    fn bare_ampersand_is_text() {
        assert_eq!(events("AT&T &"), vec![text("AT"), text("&T "), text("&")]);
    }

    #[test]
    fn comments_declarations_and_pis() {
        assert_eq!(
            events("<!DOCTYPE html><!-- c --><?xml v?><![CDATA[x]]>"),
            vec![
                Event::Declaration("DOCTYPE html"),
                Event::Comment(" c "),
                Event::ProcessingInstruction("xml v?"),
                Event::Declaration("[CDATA[x]]"),
            ]
        );
    }

    #[test]
    fn literal_less_than_is_text() {
        assert_eq!(events("a < b"), vec![text("a "), text("< b")]);
        assert_eq!(events("</ >"), vec![text("</ >")]);
    }

    #[test]
    fn unterminated_constructs_become_text() {
        assert_eq!(events("x<a href=\"y"), vec![text("x"), text("<a href=\"y")]);
        assert_eq!(events("<!-- open"), vec![text("<!-- open")]);
        assert_eq!(events("<!doctype"), vec![text("<!doctype")]);
    }

    #[test]
    fn script_content_is_raw_text() {
        assert_eq!(
            events("<script>if (a<b && c) {}</SCRIPT>"),
            vec![
                start("script", vec![]),
                text("if (a<b && c) {}"),
                end("script"),
            ]
        );
    }

    #[test]
    fn unterminated_style_runs_to_end() {
        assert_eq!(
            events("<style>p { }"),
            vec![start("style", vec![]), text("p { }")]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            events("<p>héllo — ✓</p>"),
            vec![start("p", vec![]), text("héllo — ✓"), end("p")]
        );
    }
}
