//! Property-based tests for the dialect conversion.
//!
//! These check that arbitrary input never panics and that the documented
//! invariants hold on generated markup.

use marked_popup::html_to_dialect;
use proptest::prelude::*;

/// Markup fragments glued together in any order.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "<p>", "</p>", "<PRE>", "<pre/>", "</pre>", "<hr>", "<HR/>", "</hr>", "<a href='x\"y'>",
        "</a>", "text", " ", "  ", "\n", "&amp;", "&#62;", "<!-- c -->", "<br>",
    ])
}

proptest! {
    #[test]
    fn never_panics(input in any::<String>()) {
        let _ = html_to_dialect(&input);
    }

    #[test]
    fn text_without_markup_passes_through(input in "[^<&]*") {
        prop_assert_eq!(html_to_dialect(&input), input);
    }

    #[test]
    fn idempotent_on_converted_output(parts in prop::collection::vec(fragment(), 0..24)) {
        let input = parts.concat();
        let once = html_to_dialect(&input);
        prop_assert_eq!(html_to_dialect(&once), once);
    }

    #[test]
    fn no_hr_tag_survives(parts in prop::collection::vec(fragment(), 0..24)) {
        let output = html_to_dialect(&parts.concat());
        prop_assert!(!output.contains("<hr"));
    }
}
