use async_trait::async_trait;
use futures_util::Stream;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::pin::Pin;

use super::sse_parser::sse_to_delta_stream;
use super::{Message, StreamError};

/// A lazily-pulled sequence of text deltas from one streamed completion.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>;

/// The remote model a chat session talks to.
///
/// Implementations open one streamed completion per call. The returned
/// stream is finite; an `Err` item ends it.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<DeltaStream, StreamError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Site URL sent as `HTTP-Referer` for OpenRouter app attribution.
pub const SITE_URL_ENV: &str = "OPENROUTER_SITE_URL";

/// Client for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct ChatClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    referer: Option<String>,
}

impl ChatClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            referer: None,
        }
    }

    /// Sends `referer` as the `HTTP-Referer` header when it is non-blank.
    #[must_use]
    pub fn with_referer(mut self, referer: Option<String>) -> Self {
        self.referer = referer
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Reads the referer from [`SITE_URL_ENV`].
    #[must_use]
    pub fn with_referer_from_env(self) -> Self {
        self.with_referer(std::env::var(SITE_URL_ENV).ok())
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    fn build_request(&self, url: &str, model: &str, messages: &[Message]) -> RequestBuilder {
        let chat_request = ChatCompletionRequest {
            model,
            messages,
            stream: true,
        };

        let mut http_request = self
            .client
            .post(url)
            .header("X-Title", env!("CARGO_PKG_NAME"))
            .json(&chat_request);

        if let Some(referer) = &self.referer {
            http_request = http_request.header("HTTP-Referer", referer);
        }

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        http_request
    }
}

#[async_trait]
impl ModelClient for ChatClient {
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<DeltaStream, StreamError> {
        let url = self.completions_url();
        let http_request = self.build_request(&url, model, messages);

        tracing::debug!(%url, model, messages = messages.len(), "opening completion stream");

        let response = http_request
            .send()
            .await
            .map_err(|source| StreamError::Connect {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StreamError::Status { status, body });
        }

        Ok(Box::pin(sse_to_delta_stream(response.bytes_stream())))
    }
}
