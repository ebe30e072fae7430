//! Render plain text, Markdown or reStructuredText into the restricted HTML
//! dialect of an editor popup.
//!
//! The display surface ignores raw newlines, mangles runs of spaces and has no
//! `<hr>`. [`html_to_dialect`] rewrites already-rendered HTML so that `<pre>`
//! content keeps its line and space structure and horizontal rules become a
//! styled `<div class="hr">`. Everything else passes through.

pub mod config;
pub mod envelope;
pub mod error;
pub mod markup;
pub mod popup;
pub mod rewriter;
pub mod serializer;
pub mod tokenizer;

pub use envelope::Envelope;
pub use error::{Error, Result};
pub use markup::MarkupKind;
pub use popup::Popup;

use rewriter::Rewriter;
use tokenizer::Tokenizer;
use tracing::debug;

/// Convert an HTML fragment to the popup dialect.
///
/// Never fails: malformed or unterminated markup is carried through as text.
pub fn html_to_dialect(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 8);
    let mut rewriter = Rewriter::new(Tokenizer::new(html));
    serializer::serialize_into(rewriter.by_ref(), &mut out);

    let stats = rewriter.stats();
    debug!(
        input_len = html.len(),
        output_len = out.len(),
        preformatted_regions = stats.preformatted_regions,
        rules_replaced = stats.rules_replaced,
        "converted html to dialect"
    );
    out
}
