use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Rate limits every request by client IP and, when a session cookie is
/// present, by the signed-in email as well.
pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    cookies: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request, addr, app_state.config.trust_proxy);
    let email = cookies.get("user_email").map(|c| c.value().to_owned());

    tracing::debug!(ip = %ip, email = ?email, "Applying rate limits");

    app_state.rate_limiter.check(&ip, email.as_deref()).await?;

    Ok(next.run(request).await)
}

/// Client IP used as the rate limit key. Forwarded headers are honored only
/// when `trust_proxy` is set; otherwise the socket address wins.
fn client_ip(request: &Request, addr: SocketAddr, trust_proxy: bool) -> String {
    if !trust_proxy {
        return addr.ip().to_string();
    }
    for header in ["x-forwarded-for", "x-real-ip"] {
        if let Some(value) = request.headers().get(header)
            && let Ok(value) = value.to_str()
        {
            // X-Forwarded-For carries one hop per proxy; the client comes first.
            let candidate = value.split(',').next().unwrap_or(value).trim();
            if !candidate.is_empty() {
                return candidate.to_string();
            }
        }
    }
    addr.ip().to_string()
}
