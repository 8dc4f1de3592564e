use thiserror::Error;

/// Rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document text was empty or whitespace-only; nothing was rendered
    /// and nothing may be uploaded.
    #[error("Document text must not be empty")]
    EmptyDocument,

    /// The configured font could not be loaded.
    #[error("Font unavailable at '{path}': {detail}")]
    FontUnavailable { path: String, detail: String },

    /// The PDF container could not be produced.
    #[error("PDF packaging failed: {0}")]
    Pdf(String),
}
