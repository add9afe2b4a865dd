use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::signup::WaitlistRepo,
    domain::entities::waitlist_entry::{WaitlistEntry, WaitlistStatus},
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, status, created_at";

// Waitlist entry as stored in the db; status is a plain text column.
#[derive(sqlx::FromRow, Debug)]
pub struct WaitlistEntryDb {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<WaitlistEntryDb> for WaitlistEntry {
    fn from(row: WaitlistEntryDb) -> Self {
        WaitlistEntry {
            id: row.id,
            email: row.email,
            name: row.name,
            status: WaitlistStatus::from_str(&row.status),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn exists(&self, email: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM waitlist_entries WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(exists)
    }

    async fn insert(&self, email: &str, name: Option<&str>) -> AppResult<WaitlistEntry> {
        let query = format!(
            "INSERT INTO waitlist_entries (id, email, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WaitlistEntryDb>(&query)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(name)
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.into())
    }
}
