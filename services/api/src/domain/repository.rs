#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::types::{IntentRequest, OtpRecord, PaymentIntent, PushMessage};
use crate::error::ApiError;

/// Identity-keyed store of pending verification codes.
///
/// Implementations must serialize read-modify-write access per identity so
/// a verify never observes a half-written record. The default is an
/// in-process map; the interface stays narrow (get/put/delete) so a
/// networked cache can back it in a multi-instance deployment.
pub trait OtpStore: Send + Sync {
    async fn get(&self, identity: &str) -> Result<Option<OtpRecord>, ApiError>;

    /// Store a record for `identity`, replacing any existing one.
    async fn put(&self, identity: &str, record: OtpRecord) -> Result<(), ApiError>;

    /// Remove the record for `identity`. Returns `true` if one was removed;
    /// verification relies on this to keep codes single-use under races.
    async fn delete(&self, identity: &str) -> Result<bool, ApiError>;
}

/// Wall-clock abstraction so expiry rules are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Outbound mail delivery (recipient, subject, HTML body).
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

/// Schemaless document database keyed by collection name and document id.
pub trait DocumentStore: Send + Sync {
    /// Insert a document under a generated id; returns the id.
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, ApiError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, ApiError>;

    /// Create or shallow-merge into the document at `id`.
    async fn upsert(&self, collection: &str, id: &str, doc: Value) -> Result<(), ApiError>;

    async fn list(&self, collection: &str) -> Result<Vec<Value>, ApiError>;
}

/// Payment processor API.
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, ApiError>;

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, ApiError>;
}

/// Push-notification gateway. One call delivers a single batch; callers
/// chunk larger fan-outs to `PUSH_BATCH_SIZE`.
pub trait PushGateway: Send + Sync {
    /// Returns the number of messages the gateway accepted.
    async fn send_batch(&self, messages: &[PushMessage]) -> Result<usize, ApiError>;
}
