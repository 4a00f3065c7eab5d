use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use globaledu_backend::session::{self, SESSION_COOKIE_NAME};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use super::types::*;
use crate::api::{error_response, to_json, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/auth/login - 演示登录
pub async fn login(State(state): State<Arc<AppState>>, cookies: Cookies, Json(req): Json<LoginRequest>) -> ApiResult {
    let profile = session::demo_login(&req.email_or_phone, &req.password, &state.config.auth.demo_password)
        .ok_or_else(|| {
            tracing::debug!("Rejected demo login for {:?}", req.email_or_phone.trim());
            error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
        })?;

    let now = Utc::now();
    let token = state.sessions.issue(profile.clone(), now).map_err(|e| {
        tracing::error!("Failed to sign session: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(tower_cookies::cookie::time::Duration::seconds(state.sessions.ttl().num_seconds()));
    cookies.add(cookie);

    tracing::info!("Demo login for {}", profile.email);
    to_json(&ApiResponse::success(json!({
        "token": token,
        "session": SessionInfo {
            user: profile,
            login_time: now,
            expires_at: (now + state.sessions.ttl()).timestamp(),
        },
    })))
}

/// POST /api/auth/logout - 退出登录
pub async fn logout(cookies: Cookies) -> Json<Value> {
    // path must match the one used at login for the removal to apply
    let mut removal_cookie = Cookie::new(SESSION_COOKIE_NAME, "");
    removal_cookie.set_path("/");
    cookies.remove(removal_cookie);

    Json(json!({ "success": true, "message": "Logged out" }))
}
