use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::push::{
    AdminNotificationInput, AdminNotificationUseCase, BookingNotificationInput,
    BookingNotificationUseCase, BroadcastTestUseCase, SaveTokenInput, SaveTokenUseCase,
};

// ── POST /save-token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTokenRequest {
    #[serde(default)]
    pub token: String,
    pub user_type: Option<String>,
    pub user_data: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTokenResponse {
    pub success: bool,
    pub message: String,
    pub doc_id: String,
}

pub async fn save_token(
    State(state): State<AppState>,
    Json(body): Json<SaveTokenRequest>,
) -> Result<Json<SaveTokenResponse>, ApiError> {
    let usecase = SaveTokenUseCase {
        documents: state.documents(),
    };
    let out = usecase
        .execute(SaveTokenInput {
            token: body.token,
            user_type: body.user_type,
            user_data: body.user_data,
        })
        .await?;
    Ok(Json(SaveTokenResponse {
        success: true,
        message: format!("{} token saved successfully", out.user_type),
        doc_id: out.doc_id,
    }))
}

// ── POST /send-notifications ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub success: bool,
    pub sent: usize,
}

pub async fn send_notifications(
    State(state): State<AppState>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let usecase = BroadcastTestUseCase {
        documents: state.documents(),
        push: state.push(),
    };
    let sent = usecase.execute().await?;
    Ok(Json(BroadcastResponse {
        success: true,
        sent,
    }))
}

// ── POST /send-admin-notification ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNotificationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<Value>,
    pub user_type: Option<String>,
}

#[derive(Serialize)]
pub struct NotificationSentResponse {
    pub success: bool,
    pub sent: usize,
    pub message: String,
}

pub async fn send_admin_notification(
    State(state): State<AppState>,
    Json(body): Json<AdminNotificationRequest>,
) -> Result<Json<NotificationSentResponse>, ApiError> {
    let user_type = body.user_type.clone().unwrap_or_else(|| "admin".to_owned());
    let usecase = AdminNotificationUseCase {
        documents: state.documents(),
        push: state.push(),
    };
    let sent = usecase
        .execute(AdminNotificationInput {
            title: body.title,
            message: body.message,
            data: body.data,
            user_type: body.user_type,
        })
        .await?;
    Ok(Json(NotificationSentResponse {
        success: true,
        sent,
        message: format!("Notifications sent to {sent} {user_type}(s)"),
    }))
}

// ── POST /send-booking-notification ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct BookingNotificationRequest {
    pub booking: Option<Value>,
    /// Accepted for compatibility; the alert is composed from the booking.
    pub user: Option<Value>,
}

pub async fn send_booking_notification(
    State(state): State<AppState>,
    Json(body): Json<BookingNotificationRequest>,
) -> Result<Json<NotificationSentResponse>, ApiError> {
    let usecase = BookingNotificationUseCase {
        documents: state.documents(),
        push: state.push(),
    };
    let sent = usecase
        .execute(BookingNotificationInput {
            booking: body.booking,
        })
        .await?;
    Ok(Json(NotificationSentResponse {
        success: true,
        sent,
        message: format!("Booking notification sent to {sent} admin(s)"),
    }))
}
