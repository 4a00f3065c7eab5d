//! Job board endpoints / 职位接口

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use globaledu_backend::datasets::jobs::{self, Job, JobPosting, JobQuery};
use globaledu_backend::scraper::{self, ScrapeRequest};
use serde_json::json;
use std::sync::Arc;

use super::{error_response, lenient_query, ApiResult, DirectoryResponse};
use crate::state::AppState;

/// GET /api/jobs?search&type&language
pub async fn list_jobs(query: Result<Query<JobQuery>, QueryRejection>) -> Json<DirectoryResponse<&'static Job>> {
    let query = lenient_query(query);
    let result = jobs::search(&query);
    tracing::debug!("jobs query {:?} -> {}/{}", query, result.count, result.total);
    Json(result.into())
}

/// POST /api/jobs - 提交职位，等待审核
pub async fn post_job(posting: Result<Json<JobPosting>, JsonRejection>) -> ApiResult {
    let Json(posting) = posting.map_err(|e| {
        tracing::debug!("Rejected job posting body: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid job posting")
    })?;
    let missing = posting.missing_fields();
    if !missing.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Please fill in all required fields",
                "fields": missing,
            })),
        ));
    }

    let reference = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        "Job posting {} received: {} at {} ({} requirements)",
        reference,
        posting.title.trim(),
        posting.company.trim(),
        posting.requirement_list().len()
    );
    Ok(Json(json!({
        "success": true,
        "message": "Job posted successfully! It will be reviewed before going live.",
        "data": {
            "reference": reference,
            "status": "pending_review",
        }
    })))
}

/// GET /api/jobs/scrape?type&location&limit
pub async fn scrape_jobs(
    State(state): State<Arc<AppState>>,
    request: Result<Query<ScrapeRequest>, QueryRejection>,
) -> ApiResult {
    let request = lenient_query(request);
    let outcome =
        scraper::scrape_with_timeout(state.scraper.as_ref(), &request, state.config.scraper_timeout()).await;
    let message = if outcome.degraded {
        "Job scraping is temporarily unavailable"
    } else {
        "Job scraping endpoint - no portal integration configured"
    };
    let meta = serde_json::to_value(&outcome.meta)
        .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to scrape jobs"))?;
    let data = serde_json::to_value(&outcome.data)
        .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to scrape jobs"))?;
    Ok(Json(json!({
        "success": true,
        "message": message,
        "data": data,
        "meta": meta,
    })))
}
