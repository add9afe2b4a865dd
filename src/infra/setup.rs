use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{email::resend::ResendEmailSender, http::app_state::AppState},
    application::signup::WaitlistRepo,
    infra::{config::AppConfig, postgres_persistence, rate_limit::RedisRateLimiter},
    use_cases::{
        auth::{AuthUseCases, SessionRepo, UserRepo},
        waitlist::WaitlistUseCases,
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let rate_limiter = Arc::new(
        RedisRateLimiter::new(
            &config.redis_url,
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
            config.rate_limit_per_email,
        )
        .await?,
    );

    let email = Arc::new(ResendEmailSender::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
    ));

    let waitlist_use_cases = WaitlistUseCases::new(
        postgres_arc.clone() as Arc<dyn WaitlistRepo>,
        email.clone(),
        config.app_origin.clone(),
        config.waitlist_op_timeout,
    );

    let auth_use_cases = AuthUseCases::new(
        postgres_arc.clone() as Arc<dyn UserRepo>,
        postgres_arc.clone() as Arc<dyn SessionRepo>,
        email,
        config.app_origin.clone(),
    );

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        auth_use_cases: Arc::new(auth_use_cases),
        rate_limiter,
    })
}

/// Pretty console output plus structured JSON in `app.log`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "enginuity_api=debug,tower_http=debug".into());

    let console_layer = fmt::layer().with_target(false).pretty();

    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
