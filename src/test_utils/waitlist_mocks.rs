//! In-memory mock implementations for the waitlist repository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::signup::WaitlistRepo;
use crate::domain::entities::waitlist_entry::{WaitlistEntry, WaitlistStatus};

/// In-memory implementation of WaitlistRepo for testing.
///
/// Tracks call counts so tests can assert which network operations ran, and
/// carries failure switches for driving the error paths.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<HashMap<String, WaitlistEntry>>,
    exists_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    fail_exists: AtomicBool,
    fail_insert: AtomicBool,
    conflict_on_insert: AtomicBool,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial entries, keyed by email.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        let map: HashMap<String, WaitlistEntry> = entries
            .into_iter()
            .map(|e| (e.email.clone(), e))
            .collect();
        Self {
            entries: Mutex::new(map),
            ..Self::default()
        }
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_exists(&self, fail: bool) {
        self.fail_exists.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    /// Make every insert report a unique-constraint conflict, as if a
    /// concurrent signup won the race after the existence check.
    pub fn set_conflict_on_insert(&self, conflict: bool) {
        self.conflict_on_insert.store(conflict, Ordering::SeqCst);
    }

    /// Get all entries (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn exists(&self, email: &str) -> AppResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(AppError::Database("storage offline".to_string()));
        }
        Ok(self.entries.lock().unwrap().contains_key(email))
    }

    async fn insert(&self, email: &str, name: Option<&str>) -> AppResult<WaitlistEntry> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(AppError::Database("storage offline".to_string()));
        }

        let mut entries = self.entries.lock().unwrap();
        if self.conflict_on_insert.load(Ordering::SeqCst) || entries.contains_key(email) {
            return Err(AppError::Conflict);
        }

        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.map(|n| n.to_string()),
            status: WaitlistStatus::Pending,
            created_at: Some(chrono::Utc::now().naive_utc()),
        };
        entries.insert(email.to_string(), entry.clone());
        Ok(entry)
    }
}

/// A repo whose operations never complete, for exercising timeouts and
/// abandoned submissions. `on_exists` hangs the existence check; `on_insert`
/// answers the check and then hangs the insert.
pub struct HangingWaitlistRepo {
    hang_exists: bool,
    exists_calls: AtomicUsize,
    insert_calls: AtomicUsize,
}

impl HangingWaitlistRepo {
    pub fn on_exists() -> Self {
        Self {
            hang_exists: true,
            exists_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }

    pub fn on_insert() -> Self {
        Self {
            hang_exists: false,
            exists_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaitlistRepo for HangingWaitlistRepo {
    async fn exists(&self, _email: &str) -> AppResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_exists {
            return std::future::pending().await;
        }
        Ok(false)
    }

    async fn insert(&self, _email: &str, _name: Option<&str>) -> AppResult<WaitlistEntry> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_waitlist_repo_tracks_calls_and_detects_duplicates() {
        let repo = InMemoryWaitlistRepo::new();

        assert!(!repo.exists("a@example.com").await.unwrap());
        repo.insert("a@example.com", Some("Ada")).await.unwrap();
        assert!(repo.exists("a@example.com").await.unwrap());

        let err = repo.insert("a@example.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));

        assert_eq!(repo.exists_calls(), 2);
        assert_eq!(repo.insert_calls(), 2);
    }
}
