pub mod auth;
pub mod user;
pub mod waitlist;

use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::jwt,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/waitlist", waitlist::router())
        .nest("/auth", auth::router())
        .nest("/user", user::router())
}

/// Resolve the calling user from the access token cookie.
pub(crate) fn current_user_id(cookies: &CookieJar, app_state: &AppState) -> AppResult<Uuid> {
    let access_token = cookies
        .get("access_token")
        .ok_or(AppError::InvalidCredentials)?;
    let claims = jwt::verify(access_token.value(), &app_state.config.jwt_secret)?;
    Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidCredentials)
}
