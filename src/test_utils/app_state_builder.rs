//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::signup::WaitlistRepo,
    application::use_cases::{
        EmailSender,
        auth::{AuthUseCases, SessionRepo},
        waitlist::WaitlistUseCases,
    },
    domain::entities::{user::User, waitlist_entry::WaitlistEntry},
    infra::{RateLimiterTrait, config::AppConfig},
    test_utils::{
        InMemoryEmailSender, InMemoryRateLimiter, InMemorySessionRepo, InMemoryUserRepo,
        InMemoryWaitlistRepo,
    },
};

/// Seeded users never sign in through the password path; tests that need real
/// credentials create the account through the signup route instead.
const PLACEHOLDER_HASH: &str = "unusable-password-hash";

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let entry = create_test_entry(|e| e.email = "dup@example.com".to_string());
///
/// let app_state = TestAppStateBuilder::new().with_entry(entry).build();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    users: Vec<(User, String)>,
    waitlist_repo: Option<Arc<dyn WaitlistRepo>>,
    session_repo: Option<Arc<dyn SessionRepo>>,
    email_sender: Option<Arc<dyn EmailSender>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            users: vec![],
            waitlist_repo: None,
            session_repo: None,
            email_sender: None,
        }
    }

    /// Add a waitlist entry to the test state.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Add a user account to the test state.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push((user, PLACEHOLDER_HASH.to_string()));
        self
    }

    /// Set a custom waitlist repo (for forcing storage failures).
    pub fn with_waitlist_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.waitlist_repo = Some(repo);
        self
    }

    /// Set a custom session repo (for inspecting issued sessions).
    pub fn with_session_repo(mut self, repo: Arc<dyn SessionRepo>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    /// Set a custom email sender (for testing email sending).
    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = Some(sender);
        self
    }

    /// Create app state with an in-memory waitlist repo and email sender.
    /// Returns (AppState, Arc<InMemoryWaitlistRepo>, Arc<InMemoryEmailSender>) for test assertions.
    pub fn build_with_waitlist_mocks(
        mut self,
    ) -> (AppState, Arc<InMemoryWaitlistRepo>, Arc<InMemoryEmailSender>) {
        let waitlist_repo = Arc::new(InMemoryWaitlistRepo::with_entries(std::mem::take(
            &mut self.entries,
        )));
        let email_sender = Arc::new(InMemoryEmailSender::new());

        let app_state = self
            .with_waitlist_repo(waitlist_repo.clone())
            .with_email_sender(email_sender.clone())
            .build();

        (app_state, waitlist_repo, email_sender)
    }

    /// Create app state with an in-memory session repo and email sender.
    /// Returns (AppState, Arc<InMemorySessionRepo>, Arc<InMemoryEmailSender>) for test assertions.
    pub fn build_with_auth_mocks(
        self,
    ) -> (AppState, Arc<InMemorySessionRepo>, Arc<InMemoryEmailSender>) {
        let session_repo = Arc::new(InMemorySessionRepo::new());
        let email_sender = Arc::new(InMemoryEmailSender::new());

        let app_state = self
            .with_session_repo(session_repo.clone())
            .with_email_sender(email_sender.clone())
            .build();

        (app_state, session_repo, email_sender)
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        let user_repo = Arc::new(InMemoryUserRepo::with_users(self.users));
        let waitlist_repo: Arc<dyn WaitlistRepo> = self
            .waitlist_repo
            .unwrap_or_else(|| Arc::new(InMemoryWaitlistRepo::with_entries(self.entries)));
        let session_repo: Arc<dyn SessionRepo> = self
            .session_repo
            .unwrap_or_else(|| Arc::new(InMemorySessionRepo::new()));
        let email_sender: Arc<dyn EmailSender> = self
            .email_sender
            .unwrap_or_else(|| Arc::new(InMemoryEmailSender::new()));

        let waitlist_use_cases = Arc::new(WaitlistUseCases::new(
            waitlist_repo,
            email_sender.clone(),
            "http://localhost:3000".to_string(),
            std::time::Duration::from_secs(10),
        ));

        let auth_use_cases = Arc::new(AuthUseCases::new(
            user_repo,
            session_repo,
            email_sender,
            "http://localhost:3000".to_string(),
        ));

        // Create minimal config for testing
        let config = Arc::new(AppConfig {
            jwt_secret: SecretString::new("test_jwt_secret".into()),
            access_token_ttl: Duration::hours(24),
            refresh_token_ttl: Duration::days(30),
            resend_api_key: SecretString::new("test_resend_key".into()),
            email_from: "Enginuity <hello@enginuity.test>".to_string(),
            app_origin: "http://localhost:3000".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            redis_url: String::new(),
            rate_limit_window_secs: 60,
            rate_limit_per_ip: 60,
            rate_limit_per_email: 30,
            waitlist_op_timeout: std::time::Duration::from_secs(10),
            database_url: String::new(),
            trust_proxy: false,
        });

        let rate_limiter: Arc<dyn RateLimiterTrait> = Arc::new(InMemoryRateLimiter::permissive());

        AppState {
            config,
            waitlist_use_cases,
            auth_use_cases,
            rate_limiter,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
