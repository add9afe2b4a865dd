//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::entities::waitlist_entry::{WaitlistEntry, WaitlistStatus};

/// Create a test waitlist entry with sensible defaults.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        name: None,
        status: WaitlistStatus::Pending,
        created_at: Some(test_datetime()),
    };
    overrides(&mut entry);
    entry
}

/// Create a test user with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let mut user = User {
        id: Uuid::new_v4(),
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
        email: "test@example.com".to_string(),
        name: Some("Test User".to_string()),
        role: UserRole::User,
    };
    overrides(&mut user);
    user
}

/// Returns a fixed datetime for reproducible test data.
fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_factory_applies_overrides() {
        let entry = create_test_entry(|e| {
            e.email = "custom@example.com".to_string();
            e.status = WaitlistStatus::Approved;
        });
        assert_eq!(entry.email, "custom@example.com");
        assert_eq!(entry.status, WaitlistStatus::Approved);
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_user_factory_defaults_to_user_role() {
        let user = create_test_user(|_| {});
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.email, "test@example.com");
    }
}
