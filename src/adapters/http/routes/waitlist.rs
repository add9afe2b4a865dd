use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState, app_error::AppResult,
    domain::entities::waitlist_entry::WaitlistEntry,
};

#[derive(Deserialize)]
struct JoinPayload {
    email: Option<String>,
    name: Option<String>,
}

#[derive(Serialize)]
struct JoinResponse {
    message: &'static str,
    entry: WaitlistEntry,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(join))
}

async fn join(
    State(app_state): State<AppState>,
    Json(payload): Json<JoinPayload>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let entry = app_state
        .waitlist_use_cases
        .join(&email, payload.name.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            message: "Successfully joined the waitlist",
            entry,
        }),
    ))
}
