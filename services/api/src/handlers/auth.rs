use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::OTP_VALIDITY;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::otp::{
    ResendOtpInput, ResendOtpUseCase, SendOtpInput, SendOtpUseCase, VerifyOtpInput,
    VerifyOtpUseCase,
};
use crate::usecase::token::{CreateCustomTokenInput, CreateCustomTokenUseCase};

// Missing fields deserialize to empty strings so the usecases own the
// "field is required" responses instead of the Json extractor.

#[derive(Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: &'static str,
    pub expires_in: &'static str,
}

// ── POST /auth/send-otp ──────────────────────────────────────────────────────

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let usecase = SendOtpUseCase {
        store: state.otp_store(),
        mailer: state.mailer(),
        clock: state.clock(),
    };
    usecase.execute(SendOtpInput { email: body.email }).await?;
    Ok(Json(SendOtpResponse {
        success: true,
        message: "OTP sent successfully",
        expires_in: OTP_VALIDITY,
    }))
}

// ── POST /auth/verify-otp ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let usecase = VerifyOtpUseCase {
        store: state.otp_store(),
        clock: state.clock(),
    };
    usecase
        .execute(VerifyOtpInput {
            email: body.email,
            otp: body.otp,
        })
        .await?;
    Ok(Json(VerifyOtpResponse {
        success: true,
        message: "Email verified successfully",
    }))
}

// ── POST /auth/resend-otp ────────────────────────────────────────────────────

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let usecase = ResendOtpUseCase {
        store: state.otp_store(),
        mailer: state.mailer(),
        clock: state.clock(),
    };
    usecase
        .execute(ResendOtpInput { email: body.email })
        .await?;
    Ok(Json(SendOtpResponse {
        success: true,
        message: "New OTP sent successfully",
        expires_in: OTP_VALIDITY,
    }))
}

// ── POST /auth/custom-token ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CustomTokenRequest {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub struct CustomTokenResponse {
    pub success: bool,
    pub token: String,
}

pub async fn custom_token(
    State(state): State<AppState>,
    Json(body): Json<CustomTokenRequest>,
) -> Result<Json<CustomTokenResponse>, ApiError> {
    let usecase = CreateCustomTokenUseCase {
        documents: state.documents(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let token = usecase
        .execute(CreateCustomTokenInput {
            uid: body.uid,
            email: body.email,
        })
        .await?;
    Ok(Json(CustomTokenResponse {
        success: true,
        token,
    }))
}
