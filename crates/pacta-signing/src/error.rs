use thiserror::Error;

/// E-signature provider failures.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Signing transport error: {0}")]
    Transport(String),

    #[error("Signing provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Signing response could not be parsed: {0}")]
    InvalidResponse(String),

    #[error("JWT grant failed: {0}")]
    Grant(String),

    #[error("Signing client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SigningError {
    fn from(err: reqwest::Error) -> Self {
        SigningError::Transport(err.to_string())
    }
}
