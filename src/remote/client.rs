//! Skald API HTTP client
//!
//! Async facade over the knowledge-base service: chat completions,
//! streamed chat, and memo creation.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use url::Url;

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.useskald.com";

/// Timeout for single-shot requests. Streamed chats get no overall deadline
/// so long generations are not cut off mid-answer.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the Skald knowledge-base API
#[derive(Debug, Clone)]
pub struct SkaldClient {
    client: Client,
    stream_client: Client,
    base_url: Url,
    api_key: String,
}

impl SkaldClient {
    /// Create a client for the production API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        let stream_client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            stream_client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build a URL for an endpoint
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    /// Add the bearer auth header
    fn auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.api_key))
    }

    // ============== Chat ==============

    /// Single chat completion against the knowledge base
    pub async fn chat(&self, query: &str) -> Result<ChatResponse> {
        let url = self.url("/api/v1/chat")?;

        let req = ChatRequest {
            query: query.to_string(),
        };

        let resp = self
            .auth_header(self.client.post(url))
            .json(&req)
            .send()
            .await
            .context("Failed to reach the Skald API")?;

        self.handle_response(resp).await
    }

    /// Streamed chat completion
    ///
    /// Yields `ChatEvent`s as the server produces them. The sequence is
    /// finite and ends with exactly one `Done`; the stream is not
    /// restartable.
    pub async fn streamed_chat(
        &self,
        query: &str,
    ) -> Result<impl Stream<Item = Result<ChatEvent>>> {
        let url = self.url("/api/v1/chat/stream")?;

        let req = ChatRequest {
            query: query.to_string(),
        };

        let resp = self
            .auth_header(self.stream_client.post(url))
            .json(&req)
            .send()
            .await
            .context("Failed to reach the Skald API")?;

        let status = resp.status();
        if !status.is_success() {
            let err = self.extract_error(resp).await;
            anyhow::bail!("API error ({}): {}", status, err);
        }

        // Carry a line buffer across chunks; each complete `data:` line is
        // one JSON-encoded event.
        let events = resp
            .bytes_stream()
            .map(|chunk| chunk.context("Failed to read chat stream"))
            .scan(String::new(), |buf, chunk| {
                let out = match chunk {
                    Ok(bytes) => {
                        buf.push_str(&String::from_utf8_lossy(&bytes));
                        drain_events(buf)
                    }
                    Err(err) => vec![Err(err)],
                };
                futures::future::ready(Some(futures::stream::iter(out)))
            })
            .flatten();

        Ok(events)
    }

    // ============== Memos ==============

    /// Create a memo in the knowledge base
    pub async fn create_memo(&self, req: CreateMemoRequest) -> Result<CreateMemoResponse> {
        let url = self.url("/api/v1/memos")?;

        let resp = self
            .auth_header(self.client.post(url))
            .json(&req)
            .send()
            .await
            .context("Failed to reach the Skald API")?;

        self.handle_response(resp).await
    }

    // ============== Helpers ==============

    /// Handle response and deserialize
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            anyhow::bail!("Invalid API key. Run \"skald auth\" to update it.");
        }

        if !status.is_success() {
            let err = self.extract_error(resp).await;
            anyhow::bail!("API error ({}): {}", status, err);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Extract error message from response
    async fn extract_error(&self, resp: reqwest::Response) -> String {
        if let Ok(err) = resp.json::<ApiErrorResponse>().await {
            err.error
        } else {
            "Unknown error".to_string()
        }
    }
}

/// Pull every complete event line out of the buffer, leaving any trailing
/// partial line in place.
fn drain_events(buf: &mut String) -> Vec<Result<ChatEvent>> {
    let mut events = Vec::new();

    while let Some(pos) = buf.find('\n') {
        let line: String = buf.drain(..=pos).collect();
        let line = line.trim();

        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data.is_empty() {
            continue;
        }

        events.push(
            serde_json::from_str::<ChatEvent>(data).context("Malformed chat stream event"),
        );
    }

    events
}
