//! Application wizard endpoints / 申请向导接口

use axum::{extract::State, http::StatusCode, Json};
use globaledu_backend::wizard::{self, ApplicationForm, Step};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{to_json, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Back,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: Step,
    pub action: Direction,
    #[serde(default)]
    pub form: ApplicationForm,
}

/// POST /api/apply/step - 向导前进/后退
pub async fn step(Json(req): Json<StepRequest>) -> ApiResult {
    let transition = match req.action {
        Direction::Next => wizard::next(req.step, &req.form),
        Direction::Back => wizard::back(req.step),
    };
    to_json(&ApiResponse::success(transition))
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub step: Step,
    #[serde(default)]
    pub form: ApplicationForm,
}

/// POST /api/apply/submit - 生成WhatsApp跳转链接
pub async fn submit(State(state): State<Arc<AppState>>, Json(req): Json<SubmitRequest>) -> ApiResult {
    match wizard::submit(req.step, &req.form, &state.config.contact.whatsapp_number) {
        Ok(handoff) => to_json(&ApiResponse::success(handoff)),
        Err(rejection) => {
            tracing::debug!("Application submit rejected: {:?}", rejection);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "success": false,
                    "error": "Application is incomplete",
                    "rejection": rejection,
                })),
            ))
        }
    }
}
