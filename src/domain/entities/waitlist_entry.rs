use serde::Serialize;
use uuid::Uuid;

/// Moderation state of a waitlist entry. Entries are always created as
/// `Pending`; transitions happen through an external administrative tool,
/// never through this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Approved,
    Rejected,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Pending => "pending",
            WaitlistStatus::Approved => "approved",
            WaitlistStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => WaitlistStatus::Pending,
            "approved" => WaitlistStatus::Approved,
            "rejected" => WaitlistStatus::Rejected,
            _ => WaitlistStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub status: WaitlistStatus,
    pub created_at: Option<chrono::NaiveDateTime>,
}
