use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use veranda_core::serde::iso_now;

use crate::domain::currency::{Currency, display_currency};
use crate::error::ApiError;
use crate::state::AppState;

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn root() -> &'static str {
    "Backend is running!"
}

// ── GET /api-debug ───────────────────────────────────────────────────────────

pub async fn api_debug(State(state): State<AppState>) -> Json<Value> {
    let summary = state.summary;
    Json(json!({
        "success": true,
        "message": "Backend is working",
        "timestamp": iso_now(),
        "endpoints": {
            "root": "/",
            "paymentHealth": "/payment-health",
            "createPaymentIntent": "/create-payment-intent",
            "confirmPayment": "/confirm-payment",
            "auth": {
                "sendOtp": "/auth/send-otp",
                "verifyOtp": "/auth/verify-otp",
                "resendOtp": "/auth/resend-otp",
                "customToken": "/auth/custom-token",
            },
        },
        "env": {
            "port": summary.port,
            "stripeKey": if summary.stripe_configured { "set" } else { "not set" },
            "emailUser": if summary.mail_configured { "set" } else { "not set" },
        },
    }))
}

// ── GET /payment-health ──────────────────────────────────────────────────────

pub async fn payment_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Payment service is running",
        "timestamp": iso_now(),
        "stripe": if state.summary.stripe_configured { "configured" } else { "not configured" },
        "endpoints": ["/create-payment-intent", "/confirm-payment"],
    }))
}

// ── GET /supported-currencies ────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: String,
    pub symbol: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub minimum_amount: f64,
    pub stripe_supported: bool,
}

#[derive(Serialize)]
pub struct SupportedCurrenciesResponse {
    pub success: bool,
    pub currencies: Vec<CurrencyInfo>,
}

pub async fn supported_currencies() -> Json<SupportedCurrenciesResponse> {
    // Only the launch markets are advertised to clients, even though the
    // processor accepts a few more.
    let currencies = [Currency::Inr, Currency::Gbp, Currency::Usd]
        .into_iter()
        .map(|c| CurrencyInfo {
            code: c.code().to_uppercase(),
            symbol: c.symbol(),
            name: c.name(),
            country: c.country(),
            minimum_amount: c.minimum_minor().unwrap_or(0) as f64 / 100.0,
            stripe_supported: true,
        })
        .collect();
    Json(SupportedCurrenciesResponse {
        success: true,
        currencies,
    })
}

// ── POST /get-currency ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GetCurrencyRequest {
    #[serde(default)]
    pub country: String,
}

#[derive(Serialize)]
pub struct GetCurrencyResponse {
    pub success: bool,
    pub currency: &'static str,
    pub symbol: &'static str,
    pub country: String,
}

pub async fn get_currency(
    Json(body): Json<GetCurrencyRequest>,
) -> Result<Json<GetCurrencyResponse>, ApiError> {
    if body.country.is_empty() {
        return Err(ApiError::invalid_input("Country is required"));
    }
    let currency = display_currency(&body.country);
    Ok(Json(GetCurrencyResponse {
        success: true,
        currency: currency.code(),
        symbol: currency.symbol(),
        country: body.country,
    }))
}
