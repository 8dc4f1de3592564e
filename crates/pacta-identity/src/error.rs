use thiserror::Error;

/// Identity provider failures.
///
/// Token rejection is not represented here; `get_user` returns `Ok(None)`
/// for an invalid or expired token.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity transport error: {0}")]
    Transport(String),

    #[error("Identity provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Identity response could not be parsed: {0}")]
    InvalidResponse(String),

    #[error("Identity client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Transport(err.to_string())
    }
}
