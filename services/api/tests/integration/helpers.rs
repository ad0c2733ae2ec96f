use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use veranda_api::domain::repository::{Clock, Mailer, PaymentGateway, PushGateway};
use veranda_api::domain::types::{IntentRequest, IntentStatus, PaymentIntent, PushMessage};
use veranda_api::error::ApiError;

// ── ManualClock ──────────────────────────────────────────────────────────────

/// A clock tests can move by hand.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn start_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn now_utc() -> Self {
        Self::start_at(Utc::now())
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records outbound mail; can be switched into a failing transport.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    failing: Arc<AtomicBool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.failing.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let last = sent.last().expect("no mail was sent");
        extract_code(&last.body)
    }
}

impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("smtp connection refused");
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: html_body.to_owned(),
        });
        Ok(())
    }
}

/// Pull the first run of six consecutive digits out of an email body.
pub fn extract_code(body: &str) -> String {
    let bytes = body.as_bytes();
    let mut start = None;
    let mut len = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            if start.is_none() {
                start = Some(i);
                len = 0;
            }
            len += 1;
            if len == 6 {
                let s = start.unwrap();
                // Reject runs longer than six digits.
                if i + 1 >= bytes.len() || !bytes[i + 1].is_ascii_digit() {
                    return body[s..=i].to_owned();
                }
            }
        } else {
            start = None;
        }
    }
    panic!("no 6-digit code in body: {body}");
}

// ── MockPushGateway ──────────────────────────────────────────────────────────

/// Accepts every message and remembers the batches it was handed.
#[derive(Clone, Default)]
pub struct MockPushGateway {
    batches: Arc<Mutex<Vec<Vec<PushMessage>>>>,
}

impl MockPushGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<Vec<PushMessage>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<PushMessage> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }
}

impl PushGateway for MockPushGateway {
    async fn send_batch(&self, messages: &[PushMessage]) -> Result<usize, ApiError> {
        self.batches.lock().unwrap().push(messages.to_vec());
        Ok(messages.len())
    }
}

// ── MockPaymentGateway ───────────────────────────────────────────────────────

/// Returns canned intents; `create_intent` synthesizes one from the request
/// and records it for inspection.
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    pub created: Arc<Mutex<Vec<IntentRequest>>>,
    intents: Arc<Mutex<HashMap<String, PaymentIntent>>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_intent(self, intent: PaymentIntent) -> Self {
        self.intents
            .lock()
            .unwrap()
            .insert(intent.id.clone(), intent);
        self
    }

    pub fn created_requests(&self) -> Vec<IntentRequest> {
        self.created.lock().unwrap().clone()
    }
}

impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, ApiError> {
        self.created.lock().unwrap().push(request.clone());
        Ok(PaymentIntent {
            id: "pi_test_1".to_owned(),
            client_secret: Some("pi_test_1_secret".to_owned()),
            amount_minor: request.amount_minor,
            currency: request.currency.code().to_owned(),
            status: IntentStatus::RequiresPaymentMethod,
            created: Utc::now(),
            metadata: request.metadata.iter().cloned().collect(),
        })
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, ApiError> {
        self.intents
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Upstream(format!("No such payment_intent: {id}")))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_intent(id: &str, status: IntentStatus) -> PaymentIntent {
    PaymentIntent {
        id: id.to_owned(),
        client_secret: None,
        amount_minor: 25_000,
        currency: "inr".to_owned(),
        status,
        created: Utc::now(),
        metadata: HashMap::new(),
    }
}
