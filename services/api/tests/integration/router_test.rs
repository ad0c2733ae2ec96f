use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use veranda_api::config::ServiceSummary;
use veranda_api::infra::expo::ExpoPushGateway;
use veranda_api::infra::memory::{MemoryDocumentStore, MemoryOtpStore};
use veranda_api::infra::smtp::SmtpMailer;
use veranda_api::infra::stripe::StripeGateway;
use veranda_api::router::build_router;
use veranda_api::state::AppState;

/// A fully wired server whose outbound transports point nowhere; only the
/// routes that stay in-process are exercised here.
fn test_server() -> TestServer {
    let state = AppState {
        otp_store: MemoryOtpStore::new(),
        documents: MemoryDocumentStore::new(),
        mailer: SmtpMailer::new("smtp.example.com", "noreply@example.com", "password").unwrap(),
        payments: StripeGateway::new("http://127.0.0.1:9", "sk_test_unused"),
        push: ExpoPushGateway::new("http://127.0.0.1:9/push", None),
        jwt_secret: "router-test-secret".to_owned(),
        summary: ServiceSummary {
            port: 12345,
            stripe_configured: true,
            mail_configured: false,
        },
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn root_reports_the_service_is_up() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Backend is running!");
}

#[tokio::test]
async fn health_endpoints_respond_ok() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn api_debug_reports_configured_secrets() {
    let server = test_server();
    let response = server.get("/api-debug").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["env"]["stripeKey"], "set");
    assert_eq!(body["env"]["emailUser"], "not set");
    assert_eq!(body["endpoints"]["auth"]["sendOtp"], "/auth/send-otp");
}

#[tokio::test]
async fn payment_health_reports_processor_state() {
    let server = test_server();
    let body: Value = server.get("/payment-health").await.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["stripe"], "configured");
}

#[tokio::test]
async fn supported_currencies_lists_the_launch_markets() {
    let server = test_server();
    let body: Value = server.get("/supported-currencies").await.json();
    let currencies = body["currencies"].as_array().unwrap();
    assert_eq!(currencies.len(), 3);
    assert_eq!(currencies[0]["code"], "INR");
    assert_eq!(currencies[0]["minimumAmount"], 0.5);
    assert_eq!(currencies[1]["code"], "GBP");
    assert_eq!(currencies[2]["code"], "USD");
}

#[tokio::test]
async fn get_currency_maps_countries() {
    let server = test_server();
    let body: Value = server
        .post("/get-currency")
        .json(&json!({ "country": "India" }))
        .await
        .json();
    assert_eq!(body["currency"], "inr");
    assert_eq!(body["symbol"], "₹");
    assert_eq!(body["country"], "India");
}

#[tokio::test]
async fn get_currency_requires_a_country() {
    let server = test_server();
    let response = server.post("/get-currency").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Country is required");
}

#[tokio::test]
async fn send_otp_rejects_a_missing_email_with_400() {
    let server = test_server();
    let response = server.post("/auth/send-otp").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn verify_otp_rejects_missing_fields_with_400() {
    let server = test_server();
    let response = server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email and OTP are required");
}

#[tokio::test]
async fn verify_otp_reports_unknown_identities() {
    let server = test_server();
    let response = server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "nobody@x.com", "otp": "123456" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "OTP not found or expired");
}

#[tokio::test]
async fn custom_token_round_trips_through_the_http_layer() {
    let server = test_server();
    let response = server
        .post("/auth/custom-token")
        .json(&json!({ "uid": "user-1", "email": "a@x.com" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn save_token_persists_and_reports_the_doc_id() {
    let server = test_server();
    let response = server
        .post("/save-token")
        .json(&json!({ "token": "tok-1", "userType": "admin" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["docId"], "tok-1");
    assert_eq!(body["message"], "admin token saved successfully");
}

#[tokio::test]
async fn booking_notification_404s_with_no_admin_devices() {
    let server = test_server();
    let response = server
        .post("/send-booking-notification")
        .json(&json!({ "booking": { "userName": "Asha" } }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "No admin tokens found");
}
