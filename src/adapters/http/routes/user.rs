use axum::{Json, Router, extract::State, routing::get};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    domain::entities::user::{User, UserRole},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[derive(Serialize)]
struct ProfileResponse {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: UserRole,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

async fn get_profile(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<ProfileResponse>> {
    let user_id = super::current_user_id(&jar, &app_state)?;
    let user = app_state.auth_use_cases.get_profile(user_id).await?;
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
struct UpdateProfilePayload {
    name: Option<String>,
}

async fn update_profile(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<UpdateProfilePayload>,
) -> AppResult<Json<ProfileResponse>> {
    let user_id = super::current_user_id(&jar, &app_state)?;
    let name = payload.name.unwrap_or_default();
    let user = app_state
        .auth_use_cases
        .update_profile_name(user_id, &name)
        .await?;
    Ok(Json(user.into()))
}
