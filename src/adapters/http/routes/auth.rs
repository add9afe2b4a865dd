use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::jwt,
    domain::entities::user::{User, UserRole},
};

#[derive(Deserialize)]
struct SignupPayload {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct SigninPayload {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct UserBody {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: UserRole,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Serialize)]
struct SignupResponse {
    message: &'static str,
    user: UserBody,
}

#[derive(Serialize)]
struct SessionResponse {
    user: UserBody,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }

    let user = app_state
        .auth_use_cases
        .sign_up(&email, &password, payload.name.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

async fn signin(
    State(app_state): State<AppState>,
    Json(payload): Json<SigninPayload>,
) -> AppResult<impl IntoResponse> {
    let auth = app_state.auth_use_cases.clone();
    let user = auth.sign_in(&payload.email, &payload.password).await?;

    let refresh = auth
        .open_session(user.id, app_state.config.refresh_token_ttl.whole_seconds())
        .await?;
    let headers = session_headers(&app_state, &user, refresh)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(SessionResponse { user: user.into() }),
    ))
}

async fn refresh(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let raw = cookies
        .get("refresh_token")
        .map(|c| c.value().to_owned())
        .ok_or(AppError::InvalidCredentials)?;

    let auth = app_state.auth_use_cases.clone();
    let (user, rotated) = auth
        .refresh_session(&raw, app_state.config.refresh_token_ttl.whole_seconds())
        .await?;
    let headers = session_headers(&app_state, &user, rotated)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(SessionResponse { user: user.into() }),
    ))
}

async fn logout(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    if let Some(refresh) = cookies.get("refresh_token") {
        app_state
            .auth_use_cases
            .close_session(refresh.value())
            .await?;
    }
    Ok((StatusCode::OK, clear_session_headers()))
}

async fn session(
    cookies: CookieJar,
    State(app_state): State<AppState>,
) -> AppResult<Json<SessionResponse>> {
    let user_id = super::current_user_id(&cookies, &app_state)?;
    let user = app_state.auth_use_cases.get_profile(user_id).await?;
    Ok(Json(SessionResponse { user: user.into() }))
}

/// Issues the access token and packages the three session cookies.
fn session_headers(
    app_state: &AppState,
    user: &User,
    refresh_token: String,
) -> AppResult<HeaderMap> {
    let access = jwt::issue(
        user.id,
        &app_state.config.jwt_secret,
        app_state.config.access_token_ttl,
    )?;

    let mut headers = HeaderMap::new();
    let access_cookie = Cookie::build(("access_token", access))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(app_state.config.access_token_ttl)
        .build();
    let refresh_cookie = Cookie::build(("refresh_token", refresh_token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(app_state.config.refresh_token_ttl)
        .build();
    let email_cookie = Cookie::build(("user_email", user.email.clone()))
        .http_only(false)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    for cookie in [access_cookie, refresh_cookie, email_cookie] {
        append_set_cookie(&mut headers, cookie)?;
    }
    Ok(headers)
}

/// The token cookies are always plain ASCII, but `user_email` carries user
/// input and `HeaderValue` rejects control bytes.
fn append_set_cookie(headers: &mut HeaderMap, cookie: Cookie<'_>) -> AppResult<()> {
    let value = cookie.to_string().parse().map_err(|_| {
        AppError::Internal(format!(
            "Cookie {} is not a valid header value",
            cookie.name()
        ))
    })?;
    headers.append("set-cookie", value);
    Ok(())
}

fn clear_session_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, http_only) in [
        ("access_token", true),
        ("refresh_token", true),
        ("user_email", false),
    ] {
        let cookie = Cookie::build((name, ""))
            .http_only(http_only)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(0))
            .build();
        headers.append("set-cookie", cookie.to_string().parse().unwrap());
    }
    headers
}
