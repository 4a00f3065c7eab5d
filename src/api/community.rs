//! Community endpoints / 社区接口

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use globaledu_backend::datasets::communities::{self, Community, CommunityFeed, CommunityQuery, MemberFilter};
use globaledu_backend::directory::Constraint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{error_response, lenient_query, optional_session, require_session, to_json, ApiResult};
use crate::state::AppState;

/// Community with the status the current visitor sees / 带访客状态的社区
fn personalised(state: &AppState, user: Option<&str>, community: &Community) -> Community {
    let mut view = community.clone();
    view.join_status = state.joins.status_for(user, community);
    view.is_joined = matches!(
        view.join_status,
        communities::JoinStatus::Member | communities::JoinStatus::Guest
    );
    view
}

/// GET /api/communities?search&type&city_ids&university_ids
pub async fn list_communities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<CommunityQuery>, QueryRejection>,
) -> ApiResult {
    let query = lenient_query(query);
    let claims = optional_session(&state, &headers);
    let user = claims.as_ref().map(|c| c.profile.email.as_str());
    let result = communities::search(&query).map(|c| personalised(&state, user, c));
    tracing::debug!("communities query {:?} -> {}/{}", query, result.count, result.total);
    to_json(&super::DirectoryResponse::from(result))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailQuery {
    /// Roster tab: all, active, pending or guest / 成员筛选
    pub members: Constraint<MemberFilter>,
}

#[derive(Serialize)]
pub struct CommunityDetail {
    pub community: Community,
    #[serde(flatten)]
    pub feed: CommunityFeed,
}

/// GET /api/communities/:id?members
pub async fn get_community(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> ApiResult {
    let query = lenient_query(query);
    let community =
        communities::get(&id).ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Community not found"))?;
    let claims = optional_session(&state, &headers);
    let user = claims.as_ref().map(|c| c.profile.email.as_str());

    let detail = CommunityDetail {
        community: personalised(&state, user, community),
        feed: communities::feed(&query.members),
    };
    to_json(&super::ApiResponse::success(detail))
}

/// POST /api/communities/:id/join - 申请加入社区
pub async fn join_community(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let claims = require_session(&state, &headers)?;
    let community =
        communities::get(&id).ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Community not found"))?;

    let request = state.joins.request(&claims.profile.email, community);
    to_json(&super::ApiResponse::success(request))
}
