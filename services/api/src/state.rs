use crate::config::ServiceSummary;
use crate::infra::clock::SystemClock;
use crate::infra::expo::ExpoPushGateway;
use crate::infra::memory::{MemoryDocumentStore, MemoryOtpStore};
use crate::infra::smtp::SmtpMailer;
use crate::infra::stripe::StripeGateway;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub otp_store: MemoryOtpStore,
    pub documents: MemoryDocumentStore,
    pub mailer: SmtpMailer,
    pub payments: StripeGateway,
    pub push: ExpoPushGateway,
    pub jwt_secret: String,
    pub summary: ServiceSummary,
}

impl AppState {
    pub fn otp_store(&self) -> MemoryOtpStore {
        self.otp_store.clone()
    }

    pub fn documents(&self) -> MemoryDocumentStore {
        self.documents.clone()
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }

    pub fn payments(&self) -> StripeGateway {
        self.payments.clone()
    }

    pub fn push(&self) -> ExpoPushGateway {
        self.push.clone()
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}
