/// Backend configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// TCP port to listen on (default 12345). Env var: `PORT`.
    pub port: u16,
    /// SMTP relay host (default "smtp.gmail.com"). Env var: `SMTP_HOST`.
    pub smtp_host: String,
    /// SMTP account user; also the From address. Env var: `EMAIL_USER`.
    pub smtp_user: String,
    /// SMTP app password. Env var: `EMAIL_PASS`.
    pub smtp_pass: String,
    /// HMAC secret for signing custom sign-in tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Payment processor secret key. Env var: `STRIPE_SECRET_KEY`.
    pub stripe_secret_key: String,
    /// Payment API base URL (default "https://api.stripe.com").
    /// Env var: `STRIPE_API_BASE`.
    pub stripe_api_base: String,
    /// Push gateway endpoint (default Expo's hosted one).
    /// Env var: `EXPO_PUSH_URL`.
    pub expo_push_url: String,
    /// Optional push gateway access token. Env var: `EXPO_ACCESS_TOKEN`.
    pub expo_access_token: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12345),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_owned()),
            smtp_user: std::env::var("EMAIL_USER").expect("EMAIL_USER"),
            smtp_pass: std::env::var("EMAIL_PASS").expect("EMAIL_PASS"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY"),
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_owned()),
            expo_push_url: std::env::var("EXPO_PUSH_URL")
                .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".to_owned()),
            expo_access_token: std::env::var("EXPO_ACCESS_TOKEN").ok(),
        }
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            port: self.port,
            stripe_configured: !self.stripe_secret_key.is_empty(),
            mail_configured: !self.smtp_user.is_empty(),
        }
    }
}

/// Non-secret configuration facts exposed by the debug endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSummary {
    pub port: u16,
    pub stripe_configured: bool,
    pub mail_configured: bool,
}
