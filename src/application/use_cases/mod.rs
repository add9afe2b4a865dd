use async_trait::async_trait;

use crate::app_error::AppResult;

pub mod auth;
pub mod waitlist;

/// Outbound email capability shared by the use cases.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}
