use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::EmailSender,
};
use secrecy::ExposeSecret;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Connect covers the TCP handshake and TLS; the request timeout bounds the
/// whole round trip.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transactional email delivery through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendEmailSender {
    client: Client,
    api_key: secrecy::SecretString,
    from: String,
}

impl ResendEmailSender {
    /// Panics if the TLS client cannot be constructed.
    pub fn new(api_key: secrecy::SecretString, from: String) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {e}")))?;
        response
            .error_for_status()
            .map_err(|e| AppError::Internal(format!("Email API error: {e}")))?;
        Ok(())
    }
}
