use std::collections::HashMap;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::payment::{
    ConfirmPaymentInput, ConfirmPaymentUseCase, CreatePaymentIntentInput,
    CreatePaymentIntentUseCase,
};

// ── POST /create-payment-intent ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: f64,
    pub currency: Option<String>,
    pub customer_email: Option<String>,
    /// Metadata values may arrive as any JSON scalar; non-strings are
    /// stringified before they reach the processor.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    pub country: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub success: bool,
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    pub amount: f64,
    pub currency: String,
    pub display_amount: f64,
}

fn stringify_metadata(metadata: HashMap<String, Value>) -> Vec<(String, String)> {
    metadata
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}

pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let usecase = CreatePaymentIntentUseCase {
        payments: state.payments(),
    };
    let out = usecase
        .execute(CreatePaymentIntentInput {
            amount: body.amount,
            currency: body.currency,
            customer_email: body.customer_email,
            metadata: stringify_metadata(body.metadata),
            country: body.country,
        })
        .await?;
    Ok(Json(CreatePaymentIntentResponse {
        success: true,
        client_secret: out.client_secret,
        payment_intent_id: out.payment_intent_id,
        amount: out.amount,
        currency: out.currency,
        display_amount: out.display_amount,
    }))
}

// ── POST /confirm-payment ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(default)]
    pub payment_intent_id: String,
    pub booking_data: Option<Value>,
}

#[derive(Serialize)]
pub struct PaymentIntentSummary {
    pub id: String,
    /// Major units.
    pub amount: f64,
    pub currency: String,
    #[serde(serialize_with = "veranda_core::serde::to_rfc3339_ms")]
    pub created: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    pub status: String,
    pub booking_status: &'static str,
    pub message: &'static str,
    pub payment_intent: PaymentIntentSummary,
}

pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(body): Json<ConfirmPaymentRequest>,
) -> Result<Json<ConfirmPaymentResponse>, ApiError> {
    let usecase = ConfirmPaymentUseCase {
        payments: state.payments(),
        documents: state.documents(),
    };
    let out = usecase
        .execute(ConfirmPaymentInput {
            payment_intent_id: body.payment_intent_id,
            booking_data: body.booking_data,
        })
        .await?;
    let intent = out.intent;
    Ok(Json(ConfirmPaymentResponse {
        success: out.success,
        status: intent.status.as_str().to_owned(),
        booking_status: out.booking_status,
        message: out.message,
        payment_intent: PaymentIntentSummary {
            id: intent.id,
            amount: intent.amount_minor as f64 / 100.0,
            currency: intent.currency,
            created: intent.created,
            metadata: intent.metadata,
        },
    }))
}
