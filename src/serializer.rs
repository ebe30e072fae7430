// src/serializer.rs
//
// Re-emit events as text. Tags are rebuilt from their parsed parts; everything
// else goes back out in its standard textual form.

use crate::tokenizer::{Attribute, Event};
use std::fmt;

/// Append the escaped form of an attribute value, safe inside double quotes.
///
/// `&` is left alone: references in attribute values are kept as written.
pub fn escape_attribute(value: &str, out: &mut String) {
    let mut last = 0;
    for (i, b) in value.bytes().enumerate() {
        let replacement = match b {
            b'"' => "&quot;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => continue,
        };
        out.push_str(&value[last..i]);
        out.push_str(replacement);
        last = i + 1;
    }
    out.push_str(&value[last..]);
}

fn write_tag(name: &str, attributes: &[Attribute<'_>], out: &mut String) {
    out.push('<');
    out.push_str(name);
    for attr in attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
    }
    out.push('>');
}

/// Append the textual form of one event.
pub fn write_event(event: &Event<'_>, out: &mut String) {
    match event {
        Event::StartTag { name, attributes } | Event::SelfClosingTag { name, attributes } => {
            write_tag(name, attributes, out)
        }
        Event::EndTag { name } => {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Event::Text(text) => out.push_str(text),
        Event::CharacterReference(code) => {
            out.push_str("&#");
            out.push_str(code);
            out.push(';');
        }
        Event::EntityReference(name) => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
        Event::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        Event::Declaration(body) => {
            out.push_str("<!");
            out.push_str(body);
            out.push('>');
        }
        Event::ProcessingInstruction(body) => {
            out.push_str("<?");
            out.push_str(body);
            out.push('>');
        }
    }
}

/// Append every event, in order.
pub fn serialize_into<'a, I>(events: I, out: &mut String)
where
    I: IntoIterator<Item = Event<'a>>,
{
    for event in events {
        write_event(&event, out);
    }
}

pub fn serialize<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut out = String::new();
    serialize_into(events, &mut out);
    out
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_event(self, &mut out);
        f.write_str(&out)
    }
}
