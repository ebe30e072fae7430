use crate::markup::MarkupKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to the caller of the popup pipeline.
///
/// The HTML conversion itself never fails; only selecting a markup kind and
/// running an external renderer can.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown markup kind `{given}`, kind must be one of [{}]", MarkupKind::names().join(", "))]
    UnknownMarkupKind { given: String },

    #[error("failed to render {kind} text: {message}")]
    Render { kind: MarkupKind, message: String },
}
