use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use veranda_core::health::{healthz, readyz};
use veranda_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{custom_token, resend_otp, send_otp, verify_otp},
    meta::{api_debug, get_currency, payment_health, root, supported_currencies},
    payment::{confirm_payment, create_payment_intent},
    push::{save_token, send_admin_notification, send_booking_notification, send_notifications},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health / meta
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api-debug", get(api_debug))
        .route("/payment-health", get(payment_health))
        // Auth
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/resend-otp", post(resend_otp))
        .route("/auth/custom-token", post(custom_token))
        // Payments
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/confirm-payment", post(confirm_payment))
        .route("/supported-currencies", get(supported_currencies))
        .route("/get-currency", post(get_currency))
        // Push notifications
        .route("/save-token", post(save_token))
        .route("/send-notifications", post(send_notifications))
        .route("/send-admin-notification", post(send_admin_notification))
        .route("/send-booking-notification", post(send_booking_notification))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
