use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::auth::{SessionRecord, SessionRepo},
};

#[derive(sqlx::FromRow, Debug)]
struct SessionDb {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[async_trait]
impl SessionRepo for PostgresPersistence {
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: NaiveDateTime,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: NaiveDateTime,
    ) -> AppResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionDb>(
            "SELECT id, user_id FROM sessions
             WHERE refresh_token_hash = $1
               AND revoked = false
               AND expires_at > $2",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.map(|r| SessionRecord {
            id: r.id,
            user_id: r.user_id,
        }))
    }

    async fn revoke(&self, token_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET revoked = true WHERE refresh_token_hash = $1")
            .bind(token_hash)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
