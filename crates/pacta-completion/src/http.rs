use crate::decode::Utf8StreamDecoder;
use crate::error::CompletionError;
use crate::provider::CompletionProvider;
use crate::sanitize::sanitize_completion;
use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    message: &'a str,
}

/// Streaming HTTP client for the completion endpoint.
///
/// Sends `POST {endpoint}` with `{"message": "<prompt>"}` and reads the
/// response body incrementally until the stream ends.
#[derive(Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt);
        }

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .json(&CompletionRequest { message: prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let mut stream = response.bytes_stream();
        let mut decoder = Utf8StreamDecoder::new();
        let mut assembled = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Completion stream read failed"
                );
                CompletionError::Transport(e.to_string())
            })?;
            assembled.push_str(&decoder.decode(&chunk)?);
        }
        decoder.finish()?;

        let text = sanitize_completion(&assembled);
        if text.is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }

        tracing::info!(
            endpoint = %self.endpoint,
            chars = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Completion fetch successful"
        );

        Ok(text)
    }
}
