//! Errors surfaced by the panel renderers

use thiserror::Error;

/// Renderer-side failures.
///
/// Validation problems and API-level `{success: false}` responses are NOT
/// errors here: they are regular state the renderer exposes (error maps,
/// inline messages). `PanelError` covers misuse of a renderer and broken
/// transports.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A select/radio field reached render time with no options
    #[error("field '{field}' has no options to render")]
    MissingOptions { field: String },

    /// submit() was called while a submission is already in flight
    #[error("a submission is already in flight")]
    SubmitInFlight,

    /// confirm() on a view-only modal, or set_value() on a read-only field
    #[error("the {what} is read-only")]
    ReadOnly { what: &'static str },

    /// The modal has not been opened (or failed to open)
    #[error("modal is not open")]
    NotOpen,

    /// The transport failed outright (network, decode)
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
