use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Premium,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Premium => "PREMIUM",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Unknown values fall back to the least-privileged role.
    pub fn from_str(s: &str) -> Self {
        match s {
            "PREMIUM" => UserRole::Premium,
            "ADMIN" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}
