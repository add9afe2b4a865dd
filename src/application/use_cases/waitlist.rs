use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::app_error::AppResult;
use crate::application::email_templates;
use crate::application::signup::{SignupController, WaitlistRepo};
use crate::application::use_cases::EmailSender;
use crate::domain::entities::waitlist_entry::WaitlistEntry;

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    email: Arc<dyn EmailSender>,
    app_origin: String,
    op_timeout: Duration,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        email: Arc<dyn EmailSender>,
        app_origin: String,
        op_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            email,
            app_origin,
            op_timeout,
        }
    }

    /// Run one signup through a fresh controller and send the confirmation
    /// email. The email is best-effort; by the time it goes out the entry is
    /// already committed, so a send failure only gets logged.
    #[instrument(skip(self))]
    pub async fn join(&self, email: &str, name: Option<&str>) -> AppResult<WaitlistEntry> {
        let mut controller = SignupController::new(self.repo.clone(), self.op_timeout);
        controller.set_email(email);
        if let Some(name) = name {
            controller.set_name(name);
        }
        controller.submit().await;
        let entry = controller.into_outcome()?;

        let (subject, html) =
            email_templates::waitlist_confirmation_email(&self.app_origin, entry.name.as_deref());
        if let Err(err) = self.email.send(&entry.email, &subject, &html).await {
            tracing::warn!(error = ?err, "Failed to send waitlist confirmation email");
        }

        Ok(entry)
    }
}
