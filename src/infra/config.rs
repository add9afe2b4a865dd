use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

pub struct AppConfig {
    pub jwt_secret: SecretString,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub resend_api_key: SecretString,
    pub email_from: String,
    pub app_origin: String,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub redis_url: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    pub rate_limit_per_email: u64,
    /// Ceiling for a single waitlist storage round trip.
    pub waitlist_op_timeout: std::time::Duration,
    pub database_url: String,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy (Caddy, nginx).
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret =
            SecretString::from(env::var("JWT_SECRET").expect("JWT_SECRET must be set"));

        let refresh_token_ttl_days: i64 = env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or("30".to_string())
            .parse()
            .expect("REFRESH_TOKEN_TTL_DAYS must be a valid number");

        let access_token_ttl_secs: i64 = env::var("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or("86400".to_string())
            .parse()
            .expect("ACCESS_TOKEN_TTL_SECS must be a valid number");

        let resend_api_key =
            SecretString::from(env::var("RESEND_API_KEY").expect("RESEND_API_KEY must be set"));
        let email_from = env::var("EMAIL_FROM").expect("EMAIL_FROM must be set");
        let app_origin = env::var("APP_ORIGIN").expect("APP_ORIGIN must be set");

        let cors_origin: HeaderValue = env::var("CORS_ORIGIN")
            .unwrap_or("http://localhost:3000".to_string())
            .parse()
            .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or("127.0.0.1:3001".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let redis_url = env::var("REDIS_URL").unwrap_or("redis://127.0.0.1:6379".to_string());

        let rate_limit_window_secs: u64 = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or("60".to_string())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid number");
        let rate_limit_per_ip: u64 = env::var("RATE_LIMIT_PER_IP")
            .unwrap_or("60".to_string())
            .parse()
            .expect("RATE_LIMIT_PER_IP must be a valid number");
        let rate_limit_per_email: u64 = env::var("RATE_LIMIT_PER_EMAIL")
            .unwrap_or("30".to_string())
            .parse()
            .expect("RATE_LIMIT_PER_EMAIL must be a valid number");

        let waitlist_op_timeout_secs: u64 = env::var("WAITLIST_OP_TIMEOUT_SECS")
            .unwrap_or("10".to_string())
            .parse()
            .expect("WAITLIST_OP_TIMEOUT_SECS must be a valid number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let trust_proxy: bool = env::var("TRUST_PROXY")
            .unwrap_or("false".to_string())
            .parse()
            .expect("TRUST_PROXY must be true or false");

        Self {
            jwt_secret,
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            refresh_token_ttl: Duration::days(refresh_token_ttl_days),
            resend_api_key,
            email_from,
            app_origin,
            cors_origin,
            bind_addr,
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            rate_limit_per_email,
            waitlist_op_timeout: std::time::Duration::from_secs(waitlist_op_timeout_secs),
            database_url,
            trust_proxy,
        }
    }
}
