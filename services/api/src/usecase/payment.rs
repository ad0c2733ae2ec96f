//! Payment-intent creation and confirmation against the processor API.

use serde_json::{Value, json};

use veranda_core::serde::iso_now;

use crate::domain::currency::{Currency, SUPPORTED_CURRENCIES, billing_currency};
use crate::domain::repository::{DocumentStore, PaymentGateway};
use crate::domain::types::{BOOKINGS_COLLECTION, IntentRequest, IntentStatus, PaymentIntent};
use crate::error::ApiError;

fn supported_codes() -> String {
    SUPPORTED_CURRENCIES
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── CreatePaymentIntent ──────────────────────────────────────────────────────

pub struct CreatePaymentIntentInput {
    pub amount: f64,
    /// Requested ISO code; defaults to INR and may be overridden by country.
    pub currency: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: Vec<(String, String)>,
    pub country: Option<String>,
}

#[derive(Debug)]
pub struct CreatePaymentIntentOutput {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    /// Charged amount in major units.
    pub amount: f64,
    /// Uppercase ISO code of the charged currency.
    pub currency: String,
    /// The amount exactly as the caller submitted it.
    pub display_amount: f64,
}

pub struct CreatePaymentIntentUseCase<G: PaymentGateway> {
    pub payments: G,
}

impl<G: PaymentGateway> CreatePaymentIntentUseCase<G> {
    pub async fn execute(
        &self,
        input: CreatePaymentIntentInput,
    ) -> Result<CreatePaymentIntentOutput, ApiError> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(ApiError::invalid_payment("Valid amount is required"));
        }

        let requested = input
            .currency
            .as_deref()
            .unwrap_or("inr")
            .to_lowercase();
        let country = input.country.as_deref().unwrap_or("India");

        // The launch markets charge in their home currency no matter what
        // the client asked for.
        let code = match billing_currency(country) {
            Some(c) => c.code().to_owned(),
            None => requested,
        };
        let currency = Currency::parse(&code).ok_or_else(|| {
            ApiError::invalid_payment(format!(
                "Currency {code} is not supported. Supported currencies: {}",
                supported_codes()
            ))
        })?;

        let amount_minor = (input.amount * 100.0).round() as i64;
        if let Some(min) = currency.minimum_minor() {
            if amount_minor < min {
                return Err(ApiError::invalid_payment(format!(
                    "Minimum amount for {} is {}",
                    currency.code().to_uppercase(),
                    min as f64 / 100.0
                )));
            }
        }

        let mut metadata = input.metadata;
        metadata.push((
            "customerEmail".to_owned(),
            input.customer_email.unwrap_or_default(),
        ));
        metadata.push(("country".to_owned(), country.to_owned()));
        metadata.push(("originalAmount".to_owned(), input.amount.to_string()));
        metadata.push(("timestamp".to_owned(), iso_now()));

        tracing::info!(amount_minor, currency = currency.code(), "creating payment intent");

        let intent = self
            .payments
            .create_intent(&IntentRequest {
                amount_minor,
                currency,
                metadata,
            })
            .await?;

        Ok(CreatePaymentIntentOutput {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
            amount: amount_minor as f64 / 100.0,
            currency: currency.code().to_uppercase(),
            display_amount: input.amount,
        })
    }
}

// ── ConfirmPayment ───────────────────────────────────────────────────────────

pub struct ConfirmPaymentInput {
    pub payment_intent_id: String,
    pub booking_data: Option<Value>,
}

pub struct ConfirmPaymentOutput {
    pub success: bool,
    pub booking_status: &'static str,
    pub message: &'static str,
    pub intent: PaymentIntent,
}

pub struct ConfirmPaymentUseCase<G, D>
where
    G: PaymentGateway,
    D: DocumentStore,
{
    pub payments: G,
    pub documents: D,
}

impl<G, D> ConfirmPaymentUseCase<G, D>
where
    G: PaymentGateway,
    D: DocumentStore,
{
    pub async fn execute(&self, input: ConfirmPaymentInput) -> Result<ConfirmPaymentOutput, ApiError> {
        if input.payment_intent_id.is_empty() {
            return Err(ApiError::invalid_payment("Payment Intent ID is required"));
        }

        let intent = self
            .payments
            .retrieve_intent(&input.payment_intent_id)
            .await?;
        let (booking_status, message) = intent.status.booking_disposition();

        if intent.status == IntentStatus::Succeeded {
            if let Some(booking) = input.booking_data {
                // The payment already went through; a booking-write failure
                // is logged and must not fail the request.
                match self.persist_booking(&intent, booking).await {
                    Ok(id) => tracing::info!(booking_id = %id, "booking created after payment"),
                    Err(e) => tracing::error!(error = %e, "failed to create booking"),
                }
            }
        }

        Ok(ConfirmPaymentOutput {
            success: intent.status == IntentStatus::Succeeded,
            booking_status,
            message,
            intent,
        })
    }

    async fn persist_booking(&self, intent: &PaymentIntent, booking: Value) -> Result<String, ApiError> {
        let now = iso_now();
        let mut fields = match booking {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("booking".to_owned(), other);
                map
            }
        };
        fields.insert("paymentIntentId".to_owned(), json!(intent.id));
        fields.insert("paymentStatus".to_owned(), json!("succeeded"));
        fields.insert(
            "paymentAmount".to_owned(),
            json!(intent.amount_minor as f64 / 100.0),
        );
        fields.insert("paymentCurrency".to_owned(), json!(intent.currency));
        fields.insert("paymentDate".to_owned(), json!(now));
        fields.insert("status".to_owned(), json!("confirmed"));
        fields.insert("createdAt".to_owned(), json!(now));
        fields.insert("updatedAt".to_owned(), json!(now));

        self.documents
            .insert(BOOKINGS_COLLECTION, Value::Object(fields))
            .await
    }
}
