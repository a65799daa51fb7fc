//! Upstream LLM backends.
//!
//! Both providers answer a single system + user exchange with plain text.
//! Wire formats differ, so each one owns its request/response types and a
//! pure extraction function for the reply path.

pub mod deepseek;
pub mod gemini;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    MalformedBody(String),

    #[error("reply text not found in response")]
    MissingReply,

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

// Gemini carries the API key in the query string.
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Request(err.without_url())
    }
}

/// One exchange sent upstream.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError>;
}

/// Reads the body, rejects non-2xx statuses and decodes the provider's JSON.
pub(crate) async fn read_json<T>(response: reqwest::Response) -> Result<T, ProviderError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::MalformedBody(format!("{e}: {body}")))
}

/// Empty strings count as no reply.
pub(crate) fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
