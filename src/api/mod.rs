pub mod apply;
pub mod auth;
pub mod community;
pub mod dashboard;
pub mod directory;
pub mod jobs;
pub mod location;
pub mod server;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use globaledu_backend::directory::ResultSet;
use globaledu_backend::session::{self, Claims};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// `{success, data, count, total}` envelope of the directory endpoints / 目录查询响应
#[derive(Serialize)]
pub struct DirectoryResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub total: usize,
}

impl<T> From<ResultSet<T>> for DirectoryResponse<T> {
    fn from(result: ResultSet<T>) -> Self {
        Self {
            success: true,
            data: result.data,
            count: result.count,
            total: result.total,
        }
    }
}

pub fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!(ApiResponse::<()>::error(message))))
}

pub fn to_json<T: Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value).map(Json).map_err(|e| {
        tracing::error!("Failed to serialize response: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })
}

/// Query parameters, or the unconstrained default when the query string does not
/// deserialize (e.g. a repeated key) / 查询参数解析失败时视为不限条件
pub fn lenient_query<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    match query {
        Ok(Query(value)) => value,
        Err(e) => {
            tracing::debug!("Ignoring malformed query string: {}", e);
            T::default()
        }
    }
}

/// Verified session claims, or 401 / 校验会话
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Claims, (StatusCode, Json<Value>)> {
    let token = session::extract_session_token(headers)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not logged in"))?;
    state.sessions.verify(&token).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        error_response(StatusCode::UNAUTHORIZED, "Session invalid or expired")
    })
}

/// Claims when a valid session is present, ignoring bad tokens / 可选会话
pub fn optional_session(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    session::extract_session_token(headers).and_then(|token| state.sessions.verify(&token).ok())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/cities", get(directory::list_cities))
        .route("/api/universities", get(directory::list_universities))
        .route("/api/languages", get(directory::list_languages))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::post_job))
        .route("/api/jobs/scrape", get(jobs::scrape_jobs))
        .route("/api/communities", get(community::list_communities))
        .route("/api/communities/:id", get(community::get_community))
        .route("/api/communities/:id/join", post(community::join_community))
        .route("/api/location", get(location::detect_location))
        .route("/api/location/address", get(location::address_for_country))
        .route("/api/apply/step", post(apply::step))
        .route("/api/apply/submit", post(apply::submit))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::get_current_user))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use globaledu_backend::config::AppConfig;
    use globaledu_backend::datasets::Job;
    use globaledu_backend::geoip::{GeoIpManager, GeoLocator};
    use globaledu_backend::scraper::{JobScraper, ScrapeRequest};
    use globaledu_backend::session::SessionKeys;
    use parking_lot::RwLock;
    use tower::ServiceExt;

    use crate::state::JoinRegistry;

    pub struct FailingScraper;

    #[async_trait]
    impl JobScraper for FailingScraper {
        fn name(&self) -> &str {
            "failing"
        }

        async fn scrape(&self, _request: &ScrapeRequest) -> globaledu_backend::Result<Vec<Job>> {
            Err(globaledu_backend::GatewayError::Scraper("down".to_string()))
        }
    }

    /// State with no GeoIP database, no remote lookups and a fixed key
    pub fn state_with(scraper: Arc<dyn JobScraper>) -> Arc<AppState> {
        let config = AppConfig::default();
        Arc::new(AppState {
            geo: GeoLocator::new(Arc::new(RwLock::new(GeoIpManager::new())), None),
            scraper,
            sessions: SessionKeys::new(b"router-test-secret", chrono::Duration::hours(168)),
            joins: JoinRegistry::new(),
            config,
        })
    }

    pub fn state() -> Arc<AppState> {
        state_with(Arc::new(globaledu_backend::scraper::NullScraper))
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }
}
