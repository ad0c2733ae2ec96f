use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::currency::Currency;

/// Pending verification code for one identity (email address).
///
/// At most one record exists per identity; issuing or resending replaces
/// any prior record outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// 6-digit numeric code, always in `[100000, 999999]`.
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// OTP validity window in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Human-readable validity window, returned in send/resend responses.
pub const OTP_VALIDITY: &str = "10 minutes";

/// Lowest 6-digit code value; codes never have a leading zero.
pub const OTP_MIN: u32 = 100_000;

/// Size of the code space (`{100000, ..., 999999}`).
pub const OTP_SPAN: u32 = 900_000;

// ── Payments ─────────────────────────────────────────────────────────────────

/// Request to create a payment intent with the upstream processor.
#[derive(Debug, Clone)]
pub struct IntentRequest {
    /// Amount in the smallest currency unit (paisa, pence, cents).
    pub amount_minor: i64,
    pub currency: Currency,
    /// Free-form key/value metadata attached to the intent.
    pub metadata: Vec<(String, String)>,
}

/// Payment intent as reported by the processor.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount_minor: i64,
    /// Lowercase ISO currency code as the processor reports it.
    pub currency: String,
    pub status: IntentStatus,
    pub created: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
}

/// Processor-side intent status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresConfirmation,
    RequiresPaymentMethod,
    Canceled,
    Other(String),
}

impl IntentStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "succeeded" => Self::Succeeded,
            "processing" => Self::Processing,
            "requires_action" => Self::RequiresAction,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "canceled" => Self::Canceled,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Processing => "processing",
            Self::RequiresAction => "requires_action",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::Canceled => "canceled",
            Self::Other(s) => s,
        }
    }

    /// Map the processor status onto the booking state the clients display.
    pub fn booking_disposition(&self) -> (&'static str, &'static str) {
        match self {
            Self::Succeeded => ("confirmed", "Payment successful"),
            Self::Processing => ("processing", "Payment is processing"),
            Self::RequiresAction | Self::RequiresConfirmation => {
                ("requires_action", "Payment requires additional action")
            }
            Self::Canceled | Self::RequiresPaymentMethod => {
                ("failed", "Payment failed or was canceled")
            }
            Self::Other(_) => ("pending", "Payment processing"),
        }
    }
}

// ── Push notifications ───────────────────────────────────────────────────────

/// One push message addressed to a single device token.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Push gateway batch limit; larger fan-outs are chunked.
pub const PUSH_BATCH_SIZE: usize = 100;

// ── Document collections ─────────────────────────────────────────────────────

pub const BOOKINGS_COLLECTION: &str = "bookings";
pub const USERS_COLLECTION: &str = "users";
pub const ADMIN_TOKENS_COLLECTION: &str = "adminTokens";
pub const USER_TOKENS_COLLECTION: &str = "userTokens";
pub const EXPO_TOKENS_COLLECTION: &str = "expoTokens";
