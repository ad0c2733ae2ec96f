use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Backend error variants.
///
/// Response bodies follow the wire contract the mobile clients already
/// depend on: missing-field and lookup errors are `{"error": ...}`,
/// everything else is `{"success": false, "error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    InvalidPayment(String),
    #[error("OTP not found or expired")]
    OtpNotFound,
    #[error("OTP has expired")]
    OtpExpired,
    #[error("Invalid OTP")]
    OtpMismatch,
    #[error("Failed to send OTP")]
    OtpDelivery(#[source] anyhow::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_payment(msg: impl Into<String>) -> Self {
        Self::InvalidPayment(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidPayment(_) => "INVALID_PAYMENT",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::OtpDelivery(_) => "OTP_DELIVERY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_)
            | Self::InvalidPayment(_)
            | Self::OtpNotFound
            | Self::OtpExpired
            | Self::OtpMismatch => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::OtpDelivery(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Server-side errors need the anyhow chain logged so the root cause is traceable.
        match &self {
            Self::OtpDelivery(e) | Self::Internal(e) => {
                tracing::error!(error = %e, kind = self.kind(), "request failed");
            }
            Self::Upstream(msg) => {
                tracing::error!(error = %msg, kind = self.kind(), "upstream API error");
            }
            _ => {}
        }
        let body = match &self {
            Self::InvalidInput(_) | Self::NotFound(_) => serde_json::json!({
                "error": self.to_string(),
            }),
            _ => serde_json::json!({
                "success": false,
                "error": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
