use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::auth::{UserAuth, UserRepo},
    domain::entities::user::{User, UserRole},
};

/// Column list shared across queries to avoid repetition. The credential
/// column is selected only by the auth lookup.
const COLUMNS: &str = "id, email, name, role, created_at, updated_at";

// User as stored in the db; role is a plain text column.
#[derive(sqlx::FromRow, Debug)]
pub struct UserDb {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        User {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            email: row.email,
            name: row.name,
            role: UserRole::from_str(&row.role),
        }
    }
}

#[derive(sqlx::FromRow, Debug)]
struct UserAuthDb {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub password_hash: String,
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn insert(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> AppResult<User> {
        let query = format!(
            "INSERT INTO users (id, email, name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserDb>(&query)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(name)
            .bind(password_hash)
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.into())
    }

    async fn find_auth_by_email(&self, email: &str) -> AppResult<Option<UserAuth>> {
        let query = format!("SELECT {COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserAuthDb>(&query)
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.map(|r| UserAuth {
            user: User {
                id: r.id,
                created_at: r.created_at,
                updated_at: r.updated_at,
                email: r.email,
                name: r.name,
                role: UserRole::from_str(&r.role),
            },
            password_hash: r.password_hash,
        }))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserDb>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.map(User::from))
    }

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<User> {
        let query = format!(
            "UPDATE users SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserDb>(&query)
            .bind(id)
            .bind(name)
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.into())
    }
}
