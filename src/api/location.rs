//! Visitor location and office address / 访客位置与办公地址

use axum::{
    extract::{rejection::QueryRejection, ConnectInfo, Query, State},
    http::HeaderMap,
    Json,
};
use globaledu_backend::geoip::{self, Country};
use globaledu_backend::location;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::state::AppState;

/// GET /api/location - 识别访客国家并返回展示地址
pub async fn detect_location(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Json<Value> {
    let peer = connect_info.map(|ConnectInfo(addr)| addr.ip());
    let ip = geoip::extract_client_ip(&headers, peer);
    let detection = state.geo.detect(ip).await;
    tracing::debug!(
        "Visitor {:?} detected as {} via {:?}",
        ip,
        detection.country.code(),
        detection.source
    );

    Json(json!({
        "success": true,
        "data": {
            "country": detection.country,
            "source": detection.source,
            "address": location::resolve(detection.country),
        }
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressQuery {
    pub country: Option<String>,
}

/// GET /api/location/address?country
pub async fn address_for_country(query: Result<Query<AddressQuery>, QueryRejection>) -> Json<Value> {
    let query = super::lenient_query(query);
    let country = Country::from_code(query.country.as_deref().unwrap_or(""));
    Json(json!({
        "success": true,
        "data": {
            "country": country,
            "address": location::resolve(country),
        }
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get, send, state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_address_for_country() {
        let (_, _, ru) = get(build_router(state()), "/api/location/address?country=RU").await;
        assert_eq!(ru["data"]["address"]["country"], "Bangladesh");

        let (_, _, xx) = get(build_router(state()), "/api/location/address?country=XX").await;
        let (_, _, unknown) = get(build_router(state()), "/api/location/address?country=unknown").await;
        assert_eq!(xx["data"], unknown["data"]);
        assert_eq!(xx["data"]["address"]["city"], "Samara");
    }

    #[tokio::test]
    async fn test_private_visitor_falls_back_to_default() {
        let request = Request::get("/api/location")
            .header("X-Forwarded-For", "192.168.1.20")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(build_router(state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["country"], "unknown");
        assert_eq!(body["data"]["source"], "private");
        assert_eq!(body["data"]["address"]["country"], "Russia");
    }

    #[tokio::test]
    async fn test_no_address_information() {
        let (status, _, body) = get(build_router(state()), "/api/location").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["country"], "unknown");
        assert_eq!(body["data"]["source"], "none");
    }
}
