//! Push delivery via the Expo push HTTP API.

use reqwest::Client;
use serde::Deserialize;

use crate::domain::repository::PushGateway;
use crate::domain::types::PushMessage;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ExpoPushGateway {
    client: Client,
    url: String,
    access_token: Option<String>,
}

impl ExpoPushGateway {
    pub fn new(url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            access_token,
        }
    }
}

/// Per-message tickets come back under `data`; the accepted count is its
/// length. Ticket-level errors are the gateway's concern, not ours.
#[derive(Debug, Deserialize)]
struct ExpoPushResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl PushGateway for ExpoPushGateway {
    async fn send_batch(&self, messages: &[PushMessage]) -> Result<usize, ApiError> {
        if messages.is_empty() {
            return Ok(0);
        }

        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(messages);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "push gateway returned {status}: {body}"
            )));
        }

        let tickets: ExpoPushResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        Ok(tickets.data.len())
    }
}
