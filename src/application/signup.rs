use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::{EmailError, normalize_email, validate_email};
use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// Capability for the remote waitlist collection.
///
/// `exists` treats "no rows" as the expected negative result, not an error.
/// `insert` surfaces a uniqueness violation as `AppError::Conflict` so the
/// caller can handle a lost check-then-insert race explicitly.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn exists(&self, email: &str) -> AppResult<bool>;
    async fn insert(&self, email: &str, name: Option<&str>) -> AppResult<WaitlistEntry>;
}

/// Terminal failure categories for one signup submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupError {
    EmptyInput,
    MalformedEmail,
    AlreadyOnList,
    Transient,
}

impl SignupError {
    /// The single human-readable message shown for this failure. The proactive
    /// duplicate check and the insert-conflict race map to the same message.
    pub fn user_message(&self) -> &'static str {
        match self {
            SignupError::EmptyInput => "Please enter your email address",
            SignupError::MalformedEmail => "Please enter a valid email address",
            SignupError::AlreadyOnList => "This email is already on the waitlist",
            SignupError::Transient => "Something went wrong. Please try again.",
        }
    }
}

impl From<EmailError> for SignupError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Empty => SignupError::EmptyInput,
            EmailError::Malformed => SignupError::MalformedEmail,
        }
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::EmptyInput | SignupError::MalformedEmail => {
                AppError::InvalidInput(err.user_message().to_string())
            }
            SignupError::AlreadyOnList => AppError::AlreadyOnList,
            SignupError::Transient => AppError::Internal("waitlist signup failed".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupState {
    Idle,
    Submitting,
    Success,
    Failed(SignupError),
}

/// Drives one waitlist submission through
/// validate -> duplicate check -> insert, independent of any HTTP framework.
///
/// The repo capability is injected at construction time; the controller never
/// reads ambient configuration. At most one network operation is in flight
/// per controller, and both suspension points are bounded by `op_timeout`.
pub struct SignupController {
    repo: Arc<dyn WaitlistRepo>,
    op_timeout: Duration,
    email: String,
    name: Option<String>,
    state: SignupState,
    created: Option<WaitlistEntry>,
}

impl SignupController {
    pub fn new(repo: Arc<dyn WaitlistRepo>, op_timeout: Duration) -> Self {
        Self {
            repo,
            op_timeout,
            email: String::new(),
            name: None,
            state: SignupState::Idle,
            created: None,
        }
    }

    /// Update the email buffer. An edit after a failure returns the machine
    /// to `Idle`, clearing the error message.
    pub fn set_email(&mut self, value: &str) {
        self.email = value.to_string();
        if matches!(self.state, SignupState::Failed(_)) {
            self.state = SignupState::Idle;
        }
    }

    pub fn set_name(&mut self, value: &str) {
        let trimmed = value.trim();
        self.name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> &SignupState {
        &self.state
    }

    /// Message for the current state, if any.
    pub fn message(&self) -> Option<&'static str> {
        match &self.state {
            SignupState::Success => Some("Thanks for joining the waitlist!"),
            SignupState::Failed(err) => Some(err.user_message()),
            SignupState::Idle | SignupState::Submitting => None,
        }
    }

    pub fn created_entry(&self) -> Option<&WaitlistEntry> {
        self.created.as_ref()
    }

    /// Explicit return to `Idle` for a fresh submission. `Success` stays put
    /// until this is called.
    pub fn reset(&mut self) {
        self.state = SignupState::Idle;
        self.created = None;
    }

    /// Consume the controller after `submit`, yielding the created entry or
    /// the terminal failure of this submission.
    pub fn into_outcome(self) -> Result<WaitlistEntry, SignupError> {
        match self.state {
            SignupState::Success => self.created.ok_or(SignupError::Transient),
            SignupState::Failed(err) => Err(err),
            SignupState::Idle | SignupState::Submitting => Err(SignupError::Transient),
        }
    }

    /// Run one submission. Validation failures are resolved locally without
    /// touching the network; a submit while another is in flight is ignored.
    pub async fn submit(&mut self) {
        if self.state == SignupState::Submitting {
            return;
        }

        let email = normalize_email(&self.email);
        if let Err(reason) = validate_email(&email) {
            self.state = SignupState::Failed(reason.into());
            return;
        }

        self.state = SignupState::Submitting;
        match self.run_submission(&email).await {
            Ok(entry) => {
                self.email.clear();
                self.created = Some(entry);
                self.state = SignupState::Success;
            }
            Err(err) => {
                self.state = SignupState::Failed(err);
            }
        }
    }

    async fn run_submission(&self, email: &str) -> Result<WaitlistEntry, SignupError> {
        match timeout(self.op_timeout, self.repo.exists(email)).await {
            Err(_) => return Err(SignupError::Transient),
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "waitlist existence check failed");
                return Err(SignupError::Transient);
            }
            Ok(Ok(true)) => return Err(SignupError::AlreadyOnList),
            Ok(Ok(false)) => {}
        }

        match timeout(self.op_timeout, self.repo.insert(email, self.name.as_deref())).await {
            Err(_) => Err(SignupError::Transient),
            // A concurrent signup won the race between the check and the
            // insert; the unique index is the arbiter.
            Ok(Err(AppError::Conflict)) => Err(SignupError::AlreadyOnList),
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "waitlist insert failed");
                Err(SignupError::Transient)
            }
            Ok(Ok(entry)) => Ok(entry),
        }
    }
}
