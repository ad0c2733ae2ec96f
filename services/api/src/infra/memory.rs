//! In-process implementations of the OTP and document stores.
//!
//! Both are single-instance stores: state lives behind a process-wide mutex
//! and is lost on restart. OTPs are short-lived by design; the document
//! store stands in for a hosted document database in development and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::repository::{DocumentStore, OtpStore};
use crate::domain::types::OtpRecord;
use crate::error::ApiError;

// ── MemoryOtpStore ───────────────────────────────────────────────────────────

/// Identity-keyed OTP records behind a single mutex. The mutex is held only
/// for the map operation itself; mail delivery always happens after `put`
/// returns, so a slow send never stalls other identities.
#[derive(Clone, Default)]
pub struct MemoryOtpStore {
    records: Arc<Mutex<HashMap<String, OtpRecord>>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every record whose expiry has passed. Returns how many were
    /// removed. Verification checks expiry itself; this only bounds growth.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }
}

impl OtpStore for MemoryOtpStore {
    async fn get(&self, identity: &str) -> Result<Option<OtpRecord>, ApiError> {
        Ok(self.records.lock().unwrap().get(identity).cloned())
    }

    async fn put(&self, identity: &str, record: OtpRecord) -> Result<(), ApiError> {
        self.records
            .lock()
            .unwrap()
            .insert(identity.to_owned(), record);
        Ok(())
    }

    async fn delete(&self, identity: &str) -> Result<bool, ApiError> {
        Ok(self.records.lock().unwrap().remove(identity).is_some())
    }
}

/// Periodically purge expired OTP records so abandoned sign-ins do not
/// accumulate. Runs for the lifetime of the process.
pub fn spawn_expiry_sweep(store: MemoryOtpStore, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let purged = store.purge_expired(Utc::now());
            if purged > 0 {
                tracing::debug!(purged, remaining = store.len(), "purged expired OTP records");
            }
        }
    });
}

// ── MemoryDocumentStore ──────────────────────────────────────────────────────

/// Collection → document-id → JSON document.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, BTreeMap<String, Value>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

/// Shallow merge, document-database style: top-level fields of `incoming`
/// overwrite the existing document's fields; nested objects are replaced
/// wholesale, not merged.
fn merge_shallow(existing: &mut Value, incoming: Value) {
    match (existing.as_object_mut(), incoming) {
        (Some(target), Value::Object(fields)) => {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        (_, incoming) => *existing = incoming,
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, ApiError> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), doc);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, ApiError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn upsert(&self, collection: &str, id: &str, doc: Value) -> Result<(), ApiError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_owned()).or_default();
        match docs.get_mut(id) {
            Some(existing) => merge_shallow(existing, doc),
            None => {
                docs.insert(id.to_owned(), doc);
            }
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, ApiError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
