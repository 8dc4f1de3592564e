use crate::error::CompletionError;
use async_trait::async_trait;

/// Text-completion capability.
///
/// One prompt in, one assembled and sanitized text out. Implementations
/// must not retry and must not surface partial results: the caller either
/// gets the whole text or one error.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError>;
}
