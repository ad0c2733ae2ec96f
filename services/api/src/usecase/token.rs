//! Custom sign-in token minting for clients that authenticate via OTP.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use veranda_core::serde::iso_now;

use crate::domain::repository::DocumentStore;
use crate::domain::types::USERS_COLLECTION;
use crate::error::ApiError;

/// Custom-token lifetime in seconds.
const CUSTOM_TOKEN_EXP: u64 = 3600;

/// Claims carried by a custom sign-in token.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomTokenClaims {
    pub uid: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub struct CreateCustomTokenInput {
    pub uid: String,
    pub email: String,
}

pub struct CreateCustomTokenUseCase<D: DocumentStore> {
    pub documents: D,
    pub jwt_secret: String,
}

impl<D: DocumentStore> CreateCustomTokenUseCase<D> {
    pub async fn execute(&self, input: CreateCustomTokenInput) -> Result<String, ApiError> {
        if input.uid.is_empty() || input.email.is_empty() {
            return Err(ApiError::invalid_input("UID and email are required"));
        }

        // First sign-in after OTP verification lands here before any profile
        // write, so bootstrap the user document when it is missing.
        let existing = self.documents.get(USERS_COLLECTION, &input.uid).await?;
        if existing.is_none() {
            tracing::warn!(uid = %input.uid, "no user document, creating one");
            self.documents
                .upsert(
                    USERS_COLLECTION,
                    &input.uid,
                    json!({
                        "uid": input.uid,
                        "email": input.email,
                        "createdAt": iso_now(),
                    }),
                )
                .await?;
        }

        let iat = now_secs();
        let claims = CustomTokenClaims {
            uid: input.uid.clone(),
            email: input.email,
            iat,
            exp: iat + CUSTOM_TOKEN_EXP,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(e.into()))?;

        tracing::info!(uid = %input.uid, "custom token created");
        Ok(token)
    }
}
