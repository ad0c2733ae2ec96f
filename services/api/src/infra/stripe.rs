//! Payment-intent client for the Stripe REST API.
//!
//! Requests are form-encoded (the API does not accept JSON bodies); the
//! base URL is injectable so tests can point at a local mock server.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::repository::PaymentGateway;
use crate::domain::types::{IntentRequest, IntentStatus, PaymentIntent};
use crate::error::ApiError;

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.base_url)
    }

    async fn parse_intent(&self, response: reqwest::Response) -> Result<PaymentIntent, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("payment API returned {status}"));
            return Err(ApiError::Upstream(message));
        }
        let intent: StripeIntent = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        Ok(intent.into())
    }
}

impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, ApiError> {
        let mut form: Vec<(String, String)> = vec![
            ("amount".to_owned(), request.amount_minor.to_string()),
            ("currency".to_owned(), request.currency.code().to_owned()),
            (
                "automatic_payment_methods[enabled]".to_owned(),
                "true".to_owned(),
            ),
        ];
        for (key, value) in &request.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        self.parse_intent(response).await
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, ApiError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.intents_url()))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        self.parse_intent(response).await
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    status: String,
    created: i64,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<StripeIntent> for PaymentIntent {
    fn from(wire: StripeIntent) -> Self {
        PaymentIntent {
            id: wire.id,
            client_secret: wire.client_secret,
            amount_minor: wire.amount,
            currency: wire.currency,
            status: IntentStatus::parse(&wire.status),
            created: DateTime::<Utc>::from_timestamp(wire.created, 0).unwrap_or_else(Utc::now),
            metadata: wire.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}
