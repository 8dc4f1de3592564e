use thiserror::Error;

/// Errors from the completion fetch.
///
/// A fetch either produces the full assembled text or exactly one of these;
/// partial text is never surfaced.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The prompt was empty or whitespace-only; no request was made.
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// The endpoint answered with a non-success status.
    #[error("Completion endpoint returned status {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// Network failure opening the request or reading a chunk mid-stream.
    #[error("Completion transport error: {0}")]
    Transport(String),

    /// The byte stream was not valid UTF-8.
    #[error("Completion stream is not valid UTF-8 at byte offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// The stream ended cleanly but carried no text.
    #[error("Completion endpoint returned an empty response")]
    EmptyCompletion,

    /// Client construction failed.
    #[error("Completion client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}
