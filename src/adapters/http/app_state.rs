use std::sync::Arc;

use crate::{
    application::use_cases::auth::AuthUseCases,
    application::use_cases::waitlist::WaitlistUseCases,
    infra::{RateLimiterTrait, config::AppConfig},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
