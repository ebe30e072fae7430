// src/rewriter.rs
//
// Dialect rewrite over the tokenizer's event stream.
//
// - Inside <pre>: "\n" -> "<br>\n", and "  " -> "&nbsp;&nbsp;" (pairwise, left to right).
//   A newline directly after a <br> tag already has its break and is left alone, so
//   converted output converts to itself.
// - <pre/> opens a region like <pre>; the slash means nothing on a non-void element.
// - <hr>, <hr/>, <hr ...>: replaced by <div class="hr"></div>; attributes dropped.
//   A stray </hr> is dropped as well.
// - Everything else passes through.
//
// A <pre> seen while already inside one does not change `inside_preformatted`; the
// first </pre> ends the region.

use crate::tokenizer::{Attribute, Event};
use std::borrow::Cow;
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Forced line break inserted before every newline of preformatted text.
pub const LINE_BREAK: &str = "<br>\n";

/// Replacement for each pair of spaces in preformatted text.
pub const NBSP_PAIR: &str = "&nbsp;&nbsp;";

/// Class of the division standing in for a horizontal rule.
pub const HR_CLASS: &str = "hr";

/// Rewrite one text run of a preformatted region.
pub fn normalize_preformatted(text: &str) -> Cow<'_, str> {
    if !text.contains("  ") && !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("  ", NBSP_PAIR).replace('\n', LINE_BREAK))
}

/// Like [`normalize_preformatted`], but a leading newline that follows a `<br>` tag
/// keeps no extra break.
fn normalize_after<'t>(text: Cow<'t, str>, after_line_break: bool) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(t) => match t.strip_prefix('\n') {
            Some(rest) if after_line_break => {
                Cow::Owned(format!("\n{}", normalize_preformatted(rest)))
            }
            _ => normalize_preformatted(t),
        },
        Cow::Owned(t) => {
            Cow::Owned(normalize_after(Cow::Borrowed(&t), after_line_break).into_owned())
        }
    }
}

fn is_line_break(event: &Event<'_>) -> bool {
    matches!(
        event,
        Event::StartTag { name, .. } | Event::SelfClosingTag { name, .. } if name == "br"
    )
}

/// Counters gathered while rewriting, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub preformatted_regions: usize,
    pub rules_replaced: usize,
}

/// Iterator adapter applying the dialect rules to an event stream.
pub struct Rewriter<'a, I> {
    events: I,
    inside_preformatted: bool,
    after_line_break: bool,
    pending: VecDeque<Event<'a>>,
    stats: RewriteStats,
}

impl<'a, I> Rewriter<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    pub fn new(events: I) -> Self {
        Rewriter {
            events,
            inside_preformatted: false,
            after_line_break: false,
            pending: VecDeque::new(),
            stats: RewriteStats::default(),
        }
    }

    pub fn inside_preformatted(&self) -> bool {
        self.inside_preformatted
    }

    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    fn rewrite(&mut self, event: Event<'a>) -> Option<Event<'a>> {
        let after_line_break =
            std::mem::replace(&mut self.after_line_break, is_line_break(&event));
        match event {
            Event::StartTag { name, attributes } | Event::SelfClosingTag { name, attributes }
                if name == "pre" =>
            {
                if self.inside_preformatted {
                    trace!("nested <pre> inside a preformatted region");
                } else {
                    self.inside_preformatted = true;
                    self.stats.preformatted_regions += 1;
                }
                Some(Event::StartTag { name, attributes })
            }
            Event::EndTag { ref name } if name == "pre" => {
                self.inside_preformatted = false;
                Some(event)
            }
            Event::StartTag { ref name, .. } | Event::SelfClosingTag { ref name, .. }
                if name == "hr" =>
            {
                self.stats.rules_replaced += 1;
                self.pending.push_back(Event::EndTag {
                    name: Cow::Borrowed("div"),
                });
                Some(Event::StartTag {
                    name: Cow::Borrowed("div"),
                    attributes: vec![Attribute::new("class", HR_CLASS)],
                })
            }
            Event::EndTag { ref name } if name == "hr" => None,
            Event::Text(text) if self.inside_preformatted => {
                Some(Event::Text(normalize_after(text, after_line_break)))
            }
            other => Some(other),
        }
    }
}

impl<'a, I> Iterator for Rewriter<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let Some(event) = self.events.next() else {
                if self.inside_preformatted {
                    warn!("<pre> region not closed before end of input");
                    self.inside_preformatted = false;
                }
                return None;
            };
            if let Some(event) = self.rewrite(event) {
                return Some(event);
            }
        }
    }
}
