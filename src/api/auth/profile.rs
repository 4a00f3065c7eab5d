use axum::{extract::State, http::HeaderMap};
use std::sync::Arc;

use super::types::SessionInfo;
use crate::api::{require_session, to_json, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/auth/me - 当前会话用户
pub async fn get_current_user(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult {
    let claims = require_session(&state, &headers)?;
    to_json(&ApiResponse::success(SessionInfo {
        user: claims.profile,
        login_time: claims.login_time,
        expires_at: claims.exp,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{post_json, send, state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let (status, headers, body) = post_json(
            build_router(state()),
            "/api/auth/login",
            json!({ "emailOrPhone": "a@b.co", "password": "letmein" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert!(headers.get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_session_round_trip_via_cookie() {
        let state = state();
        let (status, headers, body) = post_json(
            build_router(state.clone()),
            "/api/auth/login",
            json!({ "email_or_phone": "+8801711000000", "password": "demo123" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["session"]["user"]["name"], "Student");

        let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("session_token="));
        assert!(set_cookie.contains("HttpOnly"));
        let pair = set_cookie.split(';').next().unwrap().to_string();

        let request = Request::get("/api/auth/me")
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap();
        let (status, _, me) = send(build_router(state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["user"]["email"], "+8801711000000@example.com");
        assert_eq!(me["data"]["user"]["phone"], "+8801711000000");
    }

    #[tokio::test]
    async fn test_tampered_token_is_401() {
        let state = state();
        let (_, _, body) = post_json(
            build_router(state.clone()),
            "/api/auth/login",
            json!({ "emailOrPhone": "a@b.co", "password": "demo123" }),
        )
        .await;
        let token = body["data"]["token"].as_str().unwrap();
        let tampered = format!("{}0", token);

        let request = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", tampered))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let request = Request::get("/api/auth/me").body(Body::empty()).unwrap();
        let (status, _, _) = send(build_router(state), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let request = Request::post("/api/auth/logout")
            .header(header::COOKIE, "session_token=abc.def")
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(build_router(state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("session_token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
