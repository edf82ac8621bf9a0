use banter_core::{Error, Message, Result, ServiceConfig};
use reqwest::Client as HttpClient;

use crate::types::SendMessageResponse;

/// The remote chat service, seen as one request/response call.
///
/// `Ok` carries whatever the service answered, including its own error
/// shape. `Err` means the exchange itself failed (connection, status,
/// undecodable body).
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, conversation: &[Message]) -> Result<SendMessageResponse>;
}

/// Posts the conversation as JSON to the configured endpoint
pub struct HttpBackend {
    client: HttpClient,
    url: String,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: HttpClient::new(), url: url.into() }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode a response body.
    ///
    /// Services answer rate limits and the like with a non-2xx status and
    /// the regular error shape, so the body is tried first and the status
    /// only matters when the body does not decode.
    fn decode(status: reqwest::StatusCode, body: &str) -> Result<SendMessageResponse> {
        match serde_json::from_str::<SendMessageResponse>(body) {
            Ok(response) => Ok(response),
            Err(_) if !status.is_success() => Err(Error::Backend(format!("chat service returned {}", status))),
            Err(e) => Err(Error::Backend(format!("malformed response: {}", e))),
        }
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, conversation: &[Message]) -> Result<SendMessageResponse> {
        tracing::debug!(url = %self.url, messages = conversation.len(), "posting conversation");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(conversation)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Backend(format!("failed to read response body: {}", e)))?;

        Self::decode(status, &body)
    }
}
