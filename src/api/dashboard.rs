use axum::{extract::State, http::HeaderMap};
use globaledu_backend::dashboard;
use serde::Serialize;
use std::sync::Arc;

use super::{require_session, to_json, ApiResponse, ApiResult};
use crate::state::{AppState, JoinRequest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView {
    #[serde(flatten)]
    dashboard: dashboard::Dashboard,
    join_requests: Vec<JoinRequest>,
}

/// GET /api/dashboard - 学生面板
pub async fn get_dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult {
    let claims = require_session(&state, &headers)?;
    let join_requests = state.joins.requests_of(&claims.profile.email);
    to_json(&ApiResponse::success(DashboardView {
        dashboard: dashboard::for_user(claims.profile),
        join_requests,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get, send, state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use globaledu_backend::session::Profile;

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let (status, _, _) = get(build_router(state()), "/api/dashboard").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_for_session_user() {
        let state = state();
        let token = state
            .sessions
            .issue(Profile::from_identifier("tanvir@example.com"), chrono::Utc::now())
            .unwrap();
        let request = Request::get("/api/dashboard")
            .header(header::COOKIE, format!("session_token={}", token))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(build_router(state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["name"], "tanvir");
        assert_eq!(body["data"]["progress"]["percent"], 50);
        assert_eq!(body["data"]["unreadNotifications"], 2);
        assert_eq!(body["data"]["joinRequests"], serde_json::json!([]));
    }
}
