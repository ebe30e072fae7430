// src/popup.rs
//
// text --render--> HTML --html_to_dialect--> dialect body --envelope--> popup document

use crate::envelope::Envelope;
use crate::error::Result;
use crate::markup::MarkupKind;
use tracing::debug;

/// Builds popup documents for one markup kind.
#[derive(Clone, Debug, Default)]
pub struct Popup {
    kind: MarkupKind,
    envelope: Option<Envelope>,
}

impl Popup {
    /// A popup for `kind`, wrapped in the default envelope.
    pub fn new(kind: MarkupKind) -> Self {
        Popup {
            kind,
            envelope: Some(Envelope::default()),
        }
    }

    /// Replace the envelope; `None` emits the bare dialect body.
    pub fn with_envelope(mut self, envelope: Option<Envelope>) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn kind(&self) -> MarkupKind {
        self.kind
    }

    /// Render `text` into a popup document. Empty text yields `Ok(None)`: there is
    /// nothing to show.
    pub fn build(&self, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            return Ok(None);
        }
        let html = self.kind.render(text)?;
        debug!(kind = %self.kind, text_len = text.len(), html_len = html.len(), "rendered");

        let body = crate::html_to_dialect(&html);
        Ok(Some(match &self.envelope {
            Some(envelope) => envelope.wrap(&body),
            None => body,
        }))
    }
}
