use std::time::Duration;

use tracing::info;

use veranda_api::config::ApiConfig;
use veranda_api::infra::expo::ExpoPushGateway;
use veranda_api::infra::memory::{MemoryDocumentStore, MemoryOtpStore, spawn_expiry_sweep};
use veranda_api::infra::smtp::SmtpMailer;
use veranda_api::infra::stripe::StripeGateway;
use veranda_api::router::build_router;
use veranda_api::state::AppState;

/// How often expired OTP records are swept out of the store.
const OTP_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    veranda_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let mailer = SmtpMailer::new(&config.smtp_host, &config.smtp_user, &config.smtp_pass)
        .expect("failed to build SMTP transport");
    let payments = StripeGateway::new(
        config.stripe_api_base.clone(),
        config.stripe_secret_key.clone(),
    );
    let push = ExpoPushGateway::new(config.expo_push_url.clone(), config.expo_access_token.clone());

    let otp_store = MemoryOtpStore::new();
    spawn_expiry_sweep(otp_store.clone(), OTP_SWEEP_PERIOD);

    let state = AppState {
        otp_store,
        documents: MemoryDocumentStore::new(),
        mailer,
        payments,
        push,
        jwt_secret: config.jwt_secret.clone(),
        summary: config.summary(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
