use chrono::{DateTime, Utc};
use globaledu_backend::config::AppConfig;
use globaledu_backend::datasets::communities::{Community, JoinStatus};
use globaledu_backend::geoip::GeoLocator;
use globaledu_backend::scraper::JobScraper;
use globaledu_backend::session::SessionKeys;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Pending or settled join request / 加入申请
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub id: String,
    pub community_id: String,
    pub status: JoinStatus,
    pub requested_at: DateTime<Utc>,
}

/// In-process join requests, lost on restart / 内存中的加入申请
pub struct JoinRegistry {
    /// (user email, community id) -> request / (用户邮箱, 社区ID) -> 申请
    requests: RwLock<HashMap<(String, String), JoinRequest>>,
}

impl JoinRegistry {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
        }
    }

    /// Record a join request; repeated requests return the first one / 记录加入申请
    pub fn request(&self, user: &str, community: &Community) -> JoinRequest {
        if community.join_status == JoinStatus::Member {
            return JoinRequest {
                id: String::new(),
                community_id: community.id.clone(),
                status: JoinStatus::Member,
                requested_at: Utc::now(),
            };
        }

        let mut requests = self.requests.write();
        requests
            .entry((user.to_string(), community.id.clone()))
            .or_insert_with(|| {
                tracing::info!("Join request from {} for community {}", user, community.id);
                JoinRequest {
                    id: uuid::Uuid::new_v4().to_string(),
                    community_id: community.id.clone(),
                    status: JoinStatus::Pending,
                    requested_at: Utc::now(),
                }
            })
            .clone()
    }

    /// Status the user sees for a community / 用户看到的成员状态
    pub fn status_for(&self, user: Option<&str>, community: &Community) -> JoinStatus {
        user.and_then(|u| {
            self.requests
                .read()
                .get(&(u.to_string(), community.id.clone()))
                .map(|r| r.status)
        })
        .unwrap_or(community.join_status)
    }

    pub fn requests_of(&self, user: &str) -> Vec<JoinRequest> {
        let mut list: Vec<JoinRequest> = self
            .requests
            .read()
            .iter()
            .filter(|((u, _), _)| u == user)
            .map(|(_, r)| r.clone())
            .collect();
        list.sort_by_key(|r| r.requested_at);
        list
    }
}

impl Default for JoinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub geo: GeoLocator,
    pub scraper: Arc<dyn JobScraper>,
    pub sessions: SessionKeys,
    pub joins: JoinRegistry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use globaledu_backend::datasets::communities;

    #[test]
    fn test_join_request_is_idempotent() {
        let registry = JoinRegistry::new();
        let kazan = communities::get("6").unwrap();

        let first = registry.request("a@b.co", kazan);
        assert_eq!(first.status, JoinStatus::Pending);
        let second = registry.request("a@b.co", kazan);
        assert_eq!(first.id, second.id);

        assert_eq!(registry.status_for(Some("a@b.co"), kazan), JoinStatus::Pending);
        assert_eq!(registry.status_for(Some("other@b.co"), kazan), JoinStatus::None);
        assert_eq!(registry.status_for(None, kazan), JoinStatus::None);
        assert_eq!(registry.requests_of("a@b.co").len(), 1);
    }

    #[test]
    fn test_member_community_answers_member() {
        let registry = JoinRegistry::new();
        let spb = communities::get("2").unwrap();
        assert_eq!(registry.request("a@b.co", spb).status, JoinStatus::Member);
        assert!(registry.requests_of("a@b.co").is_empty());
    }
}
