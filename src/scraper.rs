//! Job scraping seam / 职位抓取接口
//!
//! No portal integration ships. `NullScraper` answers an empty list, and any
//! scraper error or timeout degrades to an empty list as well.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::datasets::jobs::{Job, JobType};
use crate::directory::Constraint;
use crate::error::{GatewayError, Result};

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

/// Scrape parameters / 抓取参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeRequest {
    #[serde(rename = "type")]
    pub kind: Constraint<JobType>,
    pub location: Option<String>,
    pub limit: Option<String>,
}

impl ScrapeRequest {
    /// Requested limit clamped to `1..=MAX_LIMIT`; unparseable means default / 数量限制
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|n| n.clamp(1, MAX_LIMIT as i64) as usize)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().map(str::trim).unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeMeta {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub limit: usize,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub data: Vec<Job>,
    pub meta: ScrapeMeta,
    /// Set when the scraper failed and the list was replaced by an empty one
    #[serde(skip)]
    pub degraded: bool,
}

/// Source of external job listings / 外部职位来源
#[async_trait]
pub trait JobScraper: Send + Sync {
    fn name(&self) -> &str;

    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<Job>>;
}

/// Placeholder scraper with no portal behind it / 空实现
pub struct NullScraper;

#[async_trait]
impl JobScraper for NullScraper {
    fn name(&self) -> &str {
        "null"
    }

    async fn scrape(&self, _request: &ScrapeRequest) -> Result<Vec<Job>> {
        Ok(Vec::new())
    }
}

/// Run a scraper under `timeout`, failing open / 带超时抓取
pub async fn scrape_with_timeout(
    scraper: &dyn JobScraper,
    request: &ScrapeRequest,
    timeout: Duration,
) -> ScrapeOutcome {
    let limit = request.limit();
    let result = match tokio::time::timeout(timeout, scraper.scrape(request)).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Scraper(format!("timed out after {:?}", timeout))),
    };

    let (mut data, degraded) = match result {
        Ok(jobs) => (jobs, false),
        Err(e) => {
            tracing::warn!("Scraper {} failed: {}", scraper.name(), e);
            (Vec::new(), true)
        }
    };
    data.truncate(limit);

    ScrapeOutcome {
        data,
        meta: ScrapeMeta {
            kind: request
                .kind
                .value()
                .map(|k| k.to_string())
                .unwrap_or_else(|| crate::directory::filter::ALL.to_string()),
            location: request.location().to_string(),
            limit,
            scraped_at: Utc::now(),
        },
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::jobs::JOBS;

    struct FailingScraper;

    #[async_trait]
    impl JobScraper for FailingScraper {
        fn name(&self) -> &str {
            "failing"
        }

        async fn scrape(&self, _request: &ScrapeRequest) -> Result<Vec<Job>> {
            Err(GatewayError::Scraper("portal unreachable".to_string()))
        }
    }

    struct SlowScraper;

    #[async_trait]
    impl JobScraper for SlowScraper {
        fn name(&self) -> &str {
            "slow"
        }

        async fn scrape(&self, _request: &ScrapeRequest) -> Result<Vec<Job>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(JOBS.records().to_vec())
        }
    }

    struct SeedScraper;

    #[async_trait]
    impl JobScraper for SeedScraper {
        fn name(&self) -> &str {
            "seed"
        }

        async fn scrape(&self, _request: &ScrapeRequest) -> Result<Vec<Job>> {
            Ok(JOBS.records().to_vec())
        }
    }

    fn request(kind: Option<&str>, limit: Option<&str>) -> ScrapeRequest {
        ScrapeRequest {
            kind: Constraint::parse(kind),
            location: Some(" Moscow ".to_string()),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(request(None, None).limit(), 50);
        assert_eq!(request(None, Some("abc")).limit(), 50);
        assert_eq!(request(None, Some("0")).limit(), 1);
        assert_eq!(request(None, Some("-4")).limit(), 1);
        assert_eq!(request(None, Some("1000")).limit(), 200);
        assert_eq!(request(None, Some("25")).limit(), 25);
    }

    #[tokio::test]
    async fn test_null_scraper_meta() {
        let outcome = scrape_with_timeout(&NullScraper, &request(Some("part-time"), None), Duration::from_secs(1)).await;
        assert!(outcome.data.is_empty());
        assert!(!outcome.degraded);
        assert_eq!(outcome.meta.kind, "part-time");
        assert_eq!(outcome.meta.location, "Moscow");
        assert_eq!(outcome.meta.limit, 50);

        let unconstrained = scrape_with_timeout(&NullScraper, &request(None, None), Duration::from_secs(1)).await;
        assert_eq!(unconstrained.meta.kind, "all");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        let outcome = scrape_with_timeout(&FailingScraper, &request(None, None), Duration::from_secs(1)).await;
        assert!(outcome.data.is_empty());
        assert!(outcome.degraded);
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_empty() {
        let outcome = scrape_with_timeout(&SlowScraper, &request(None, None), Duration::from_millis(20)).await;
        assert!(outcome.data.is_empty());
        assert!(outcome.degraded);
    }

    #[tokio::test]
    async fn test_results_truncated_to_limit() {
        let outcome = scrape_with_timeout(&SeedScraper, &request(None, Some("3")), Duration::from_secs(1)).await;
        assert_eq!(outcome.data.len(), 3);
    }
}
