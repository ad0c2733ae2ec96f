//! Push-notification fan-out and device-token persistence.

use serde_json::{Value, json};

use veranda_core::serde::iso_now;

use crate::domain::currency::price_symbol;
use crate::domain::repository::{DocumentStore, PushGateway};
use crate::domain::types::{
    ADMIN_TOKENS_COLLECTION, EXPO_TOKENS_COLLECTION, PUSH_BATCH_SIZE, PushMessage,
    USER_TOKENS_COLLECTION,
};
use crate::error::ApiError;

/// Pull non-empty `token` fields out of a token-document collection.
fn device_tokens(docs: &[Value]) -> Vec<String> {
    docs.iter()
        .filter_map(|doc| doc.get("token").and_then(Value::as_str))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Send in gateway-sized batches, summing the accepted counts.
async fn dispatch_chunks<P: PushGateway>(
    push: &P,
    messages: &[PushMessage],
) -> Result<usize, ApiError> {
    let mut sent = 0;
    for chunk in messages.chunks(PUSH_BATCH_SIZE) {
        sent += push.send_batch(chunk).await?;
    }
    Ok(sent)
}

// ── SaveToken ────────────────────────────────────────────────────────────────

pub struct SaveTokenInput {
    pub token: String,
    /// "user" or "admin"; decides the target collection.
    pub user_type: Option<String>,
    pub user_data: Option<Value>,
}

pub struct SaveTokenOutput {
    pub doc_id: String,
    pub user_type: String,
}

pub struct SaveTokenUseCase<D: DocumentStore> {
    pub documents: D,
}

impl<D: DocumentStore> SaveTokenUseCase<D> {
    pub async fn execute(&self, input: SaveTokenInput) -> Result<SaveTokenOutput, ApiError> {
        let user_type = input.user_type.unwrap_or_else(|| "user".to_owned());
        let user_data = input.user_data.unwrap_or_else(|| json!({}));

        let doc_id = user_data
            .get("uid")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| input.token.clone());

        let now = iso_now();
        let mut doc = serde_json::Map::new();
        doc.insert("token".to_owned(), json!(input.token));
        doc.insert("userType".to_owned(), json!(user_type));
        doc.insert("userData".to_owned(), user_data.clone());
        doc.insert("platform".to_owned(), json!("android"));
        doc.insert("createdAt".to_owned(), json!(now));
        doc.insert("updatedAt".to_owned(), json!(now));
        // User-profile fields are flattened into the document as well, so
        // token lookups by uid/email keep working for the admin dashboard.
        if let Value::Object(fields) = user_data {
            for (key, value) in fields {
                doc.insert(key, value);
            }
        }

        let collection = if user_type == "admin" {
            ADMIN_TOKENS_COLLECTION
        } else {
            USER_TOKENS_COLLECTION
        };
        self.documents
            .upsert(collection, &doc_id, Value::Object(doc))
            .await?;

        tracing::info!(%doc_id, %user_type, "device token saved");
        Ok(SaveTokenOutput { doc_id, user_type })
    }
}

// ── BroadcastTest ────────────────────────────────────────────────────────────

pub struct BroadcastTestUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    pub documents: D,
    pub push: P,
}

impl<D, P> BroadcastTestUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    /// Fan a fixed test notification out to every registered device.
    /// Returns the number of messages built (not gateway receipts).
    pub async fn execute(&self) -> Result<usize, ApiError> {
        let docs = self.documents.list(EXPO_TOKENS_COLLECTION).await?;
        let messages: Vec<PushMessage> = device_tokens(&docs)
            .into_iter()
            .map(|token| PushMessage {
                to: token,
                sound: "default".to_owned(),
                title: "Booking App".to_owned(),
                body: "This is a test notification!".to_owned(),
                data: json!({ "extraData": "Some data" }),
            })
            .collect();

        dispatch_chunks(&self.push, &messages).await?;
        Ok(messages.len())
    }
}

// ── SendAdminNotification ────────────────────────────────────────────────────

pub struct AdminNotificationInput {
    pub title: String,
    pub message: String,
    pub data: Option<Value>,
    /// "admin" targets the admin token collection; anything else broadcasts.
    pub user_type: Option<String>,
}

pub struct AdminNotificationUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    pub documents: D,
    pub push: P,
}

impl<D, P> AdminNotificationUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    pub async fn execute(&self, input: AdminNotificationInput) -> Result<usize, ApiError> {
        if input.title.is_empty() || input.message.is_empty() {
            return Err(ApiError::invalid_input("Title and message required"));
        }

        let user_type = input.user_type.unwrap_or_else(|| "admin".to_owned());
        let collection = if user_type == "admin" {
            ADMIN_TOKENS_COLLECTION
        } else {
            EXPO_TOKENS_COLLECTION
        };
        let tokens = device_tokens(&self.documents.list(collection).await?);
        if tokens.is_empty() {
            tracing::warn!(%user_type, "no device tokens registered");
            return Err(ApiError::NotFound("No tokens found".to_owned()));
        }

        let mut data = match input.data {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        data.insert("type".to_owned(), json!("booking_notification"));
        data.insert("timestamp".to_owned(), json!(iso_now()));
        let data = Value::Object(data);

        let messages: Vec<PushMessage> = tokens
            .into_iter()
            .map(|token| PushMessage {
                to: token,
                sound: "default".to_owned(),
                title: input.title.clone(),
                body: input.message.clone(),
                data: data.clone(),
            })
            .collect();

        tracing::info!(count = messages.len(), %user_type, "sending admin notification");
        dispatch_chunks(&self.push, &messages).await
    }
}

// ── SendBookingNotification ──────────────────────────────────────────────────

pub struct BookingNotificationInput {
    pub booking: Option<Value>,
}

pub struct BookingNotificationUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    pub documents: D,
    pub push: P,
}

fn field_text<'a>(booking: &'a Value, key: &str) -> Option<&'a str> {
    booking.get(key).and_then(Value::as_str)
}

fn field_display(booking: &Value, key: &str) -> String {
    match booking.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "?".to_owned(),
        Some(other) => other.to_string(),
    }
}

/// Compose the admin-facing alert for a new booking.
fn booking_alert(booking: &Value) -> (String, String) {
    let guest = field_text(booking, "userName").unwrap_or("A guest");
    let (title, mut message) = match field_text(booking, "category") {
        Some("resorts") => (
            "🏨 New Resort Booking".to_owned(),
            format!(
                "{guest} booked {} room(s) for {} night(s)",
                field_display(booking, "numberOfRooms"),
                field_display(booking, "numberOfNights"),
            ),
        ),
        Some("tours") => (
            "🚌 New Tour Booking".to_owned(),
            format!(
                "{guest} booked {} people for {}",
                field_display(booking, "numberOfPeople"),
                field_display(booking, "itemName"),
            ),
        ),
        _ if field_text(booking, "type") == Some("Restaurant") => (
            "🍽️ New Restaurant Reservation".to_owned(),
            format!(
                "{guest} reserved for {} people",
                field_display(booking, "numberOfAdults"),
            ),
        ),
        _ => (
            "📅 New Booking".to_owned(),
            format!("{guest} made a new booking for {}", field_display(booking, "itemName")),
        ),
    };

    let symbol = price_symbol(field_text(booking, "country"));
    message.push_str(&format!(" - {symbol}{}", field_display(booking, "totalPrice")));
    (title, message)
}

impl<D, P> BookingNotificationUseCase<D, P>
where
    D: DocumentStore,
    P: PushGateway,
{
    pub async fn execute(&self, input: BookingNotificationInput) -> Result<usize, ApiError> {
        let booking = input
            .booking
            .ok_or_else(|| ApiError::invalid_input("Booking data required"))?;

        let tokens = device_tokens(&self.documents.list(ADMIN_TOKENS_COLLECTION).await?);
        if tokens.is_empty() {
            tracing::warn!("no admin tokens registered");
            return Err(ApiError::NotFound("No admin tokens found".to_owned()));
        }

        let (title, message) = booking_alert(&booking);
        let data = json!({
            "type": "new_booking",
            "bookingId": booking.get("id").cloned().unwrap_or(Value::Null),
            "category": booking.get("category").cloned().unwrap_or(Value::Null),
            "userId": booking.get("userId").cloned().unwrap_or(Value::Null),
            "userName": booking.get("userName").cloned().unwrap_or(Value::Null),
            "totalPrice": booking.get("totalPrice").cloned().unwrap_or(Value::Null),
            "timestamp": iso_now(),
        });

        let messages: Vec<PushMessage> = tokens
            .into_iter()
            .map(|token| PushMessage {
                to: token,
                sound: "default".to_owned(),
                title: title.clone(),
                body: message.clone(),
                data: data.clone(),
            })
            .collect();

        tracing::info!(count = messages.len(), "sending booking notification");
        dispatch_chunks(&self.push, &messages).await
    }
}
