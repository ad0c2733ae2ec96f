//! OTP lifecycle: issue, verify, resend.
//!
//! Per identity, at most one code is pending at a time; a new issue or
//! resend replaces it. Codes are single-use and valid for ten minutes.

use chrono::Duration;
use rand::RngExt;

use crate::domain::repository::{Clock, Mailer, OtpStore};
use crate::domain::types::{OTP_MIN, OTP_SPAN, OTP_TTL_SECS, OtpRecord};
use crate::error::ApiError;

/// Uniform draw over `{100000, ..., 999999}`: always six digits, a leading
/// zero is impossible.
fn generate_code() -> String {
    let mut rng = rand::rng();
    (OTP_MIN + rng.random_range(0..OTP_SPAN)).to_string()
}

fn otp_email_body(code: &str, resend: bool) -> String {
    let lead = if resend {
        "Your new OTP verification code is:"
    } else {
        "Your OTP verification code is:"
    };
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Email Verification</h2>
  <p>{lead}</p>
  <div style="background: #f4f4f4; padding: 15px; text-align: center; font-size: 24px; font-weight: bold; letter-spacing: 5px; margin: 20px 0;">
    {code}
  </div>
  <p>This code will expire in 10 minutes.</p>
  <p>If you didn't request this code, please ignore this email.</p>
</div>"#
    )
}

/// Generate, store, then mail a fresh code. The record is committed before
/// the send is attempted and stays in place if the send fails; the caller
/// recovers by resending, which replaces it.
async fn issue<S, M, C>(
    store: &S,
    mailer: &M,
    clock: &C,
    email: &str,
    subject: &str,
    resend: bool,
) -> Result<(), ApiError>
where
    S: OtpStore,
    M: Mailer,
    C: Clock,
{
    let code = generate_code();
    let now = clock.now();
    let record = OtpRecord {
        code: code.clone(),
        issued_at: now,
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
    };
    store.put(email, record).await?;

    mailer
        .send(email, subject, &otp_email_body(&code, resend))
        .await
        .map_err(ApiError::OtpDelivery)?;

    tracing::info!(identity = %email, resend, "OTP dispatched");
    Ok(())
}

// ── SendOtp ──────────────────────────────────────────────────────────────────

pub struct SendOtpInput {
    pub email: String,
}

pub struct SendOtpUseCase<S, M, C>
where
    S: OtpStore,
    M: Mailer,
    C: Clock,
{
    pub store: S,
    pub mailer: M,
    pub clock: C,
}

impl<S, M, C> SendOtpUseCase<S, M, C>
where
    S: OtpStore,
    M: Mailer,
    C: Clock,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<(), ApiError> {
        if input.email.is_empty() {
            return Err(ApiError::invalid_input("Email is required"));
        }
        issue(
            &self.store,
            &self.mailer,
            &self.clock,
            &input.email,
            "Your OTP Verification Code",
            false,
        )
        .await
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

pub struct VerifyOtpUseCase<S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub store: S,
    pub clock: C,
}

impl<S, C> VerifyOtpUseCase<S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), ApiError> {
        if input.email.is_empty() || input.otp.is_empty() {
            return Err(ApiError::invalid_input("Email and OTP are required"));
        }

        let record = self
            .store
            .get(&input.email)
            .await?
            .ok_or(ApiError::OtpNotFound)?;

        if record.is_expired(self.clock.now()) {
            self.store.delete(&input.email).await?;
            return Err(ApiError::OtpExpired);
        }

        // Exact string comparison, no normalization. A mismatch keeps the
        // record so further attempts within the window are allowed.
        if record.code != input.otp {
            return Err(ApiError::OtpMismatch);
        }

        // Single-use: the deletion must be ours. If a concurrent verify
        // already consumed the record, report it gone.
        if !self.store.delete(&input.email).await? {
            return Err(ApiError::OtpNotFound);
        }

        tracing::info!(identity = %input.email, "OTP verified");
        Ok(())
    }
}

// ── ResendOtp ────────────────────────────────────────────────────────────────

pub struct ResendOtpInput {
    pub email: String,
}

pub struct ResendOtpUseCase<S, M, C>
where
    S: OtpStore,
    M: Mailer,
    C: Clock,
{
    pub store: S,
    pub mailer: M,
    pub clock: C,
}

impl<S, M, C> ResendOtpUseCase<S, M, C>
where
    S: OtpStore,
    M: Mailer,
    C: Clock,
{
    pub async fn execute(&self, input: ResendOtpInput) -> Result<(), ApiError> {
        if input.email.is_empty() {
            return Err(ApiError::invalid_input("Email is required"));
        }
        // Invalidate-first: the prior code must never verify after a resend,
        // even when it has not yet expired.
        self.store.delete(&input.email).await?;
        issue(
            &self.store,
            &self.mailer,
            &self.clock,
            &input.email,
            "Your New OTP Verification Code",
            true,
        )
        .await
    }
}
