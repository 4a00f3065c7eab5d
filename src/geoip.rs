//! GeoIP module - visitor country detection / 访客国家识别
//!
//! Lookup order:
//! - local MaxMind database `GeoLite2-Country.mmdb` under the configured dir
//! - remote ipapi-style JSON provider (`country_code`) under a short timeout
//!
//! Every failure path answers `Country::Unknown`.

use maxminddb::{geoip2, Reader};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{self, GeoIpConfig};
use crate::error::{GatewayError, Result};

/// Countries the address swap cares about / 关注的国家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "RU")]
    Russia,
    #[serde(rename = "BD")]
    Bangladesh,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Country {
    /// Map an ISO 3166-1 alpha-2 code; anything else is `Unknown` / 由国家代码映射
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "RU" => Country::Russia,
            "BD" => Country::Bangladesh,
            _ => Country::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Country::Russia => "RU",
            Country::Bangladesh => "BD",
            Country::Unknown => "unknown",
        }
    }
}

/// Where a detection answer came from / 识别来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoSource {
    Database,
    Remote,
    Private,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub country: Country,
    pub source: GeoSource,
}

impl Detection {
    fn unknown(source: GeoSource) -> Self {
        Self { country: Country::Unknown, source }
    }
}

/// Local MaxMind reader / 本地GeoIP数据库
pub struct GeoIpManager {
    country_reader: Option<Reader<Vec<u8>>>,
}

impl GeoIpManager {
    pub fn new() -> Self {
        Self { country_reader: None }
    }

    pub fn load_from_dir<P: AsRef<Path>>(&mut self, dir: P) {
        let path = dir.as_ref().join("GeoLite2-Country.mmdb");
        if !path.exists() {
            tracing::debug!("No GeoIP database at {:?}", path);
            return;
        }
        match Reader::open_readfile(&path) {
            Ok(reader) => {
                tracing::info!("Loading GeoIP database: {:?}", path);
                self.country_reader = Some(reader);
            }
            Err(e) => tracing::warn!("Failed to load {:?}: {}", path, e),
        }
    }

    pub fn get_country_code(&self, ip: IpAddr) -> Option<String> {
        let reader = self.country_reader.as_ref()?;
        let country = reader.lookup::<geoip2::Country>(ip).ok()?;
        country.country?.iso_code.map(|s| s.to_string())
    }

    pub fn is_loaded(&self) -> bool {
        self.country_reader.is_some()
    }
}

impl Default for GeoIpManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_unspecified()
                || (ipv4.octets()[0] == 100 && ipv4.octets()[1] >= 64 && ipv4.octets()[1] <= 127)
        }
        IpAddr::V6(ipv6) => {
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Client address from proxy headers, falling back to the socket peer / 获取客户端IP
pub fn extract_client_ip(headers: &axum::http::HeaderMap, connect_ip: Option<IpAddr>) -> Option<IpAddr> {
    for header in ["CF-Connecting-IP", "X-Real-IP"] {
        if let Some(ip) = headers
            .get(header)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Some(ip);
        }
    }

    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    connect_ip
}

#[derive(Debug, Deserialize)]
struct RemoteAnswer {
    country_code: Option<String>,
}

/// Remote geolocation client / 远程地理位置查询
#[derive(Clone)]
pub struct RemoteLocator {
    client: reqwest::Client,
    url_template: String,
    timeout: Duration,
}

impl RemoteLocator {
    pub fn new(url_template: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url_template: url_template.to_string(),
            timeout,
        }
    }

    pub fn from_config(geo: &GeoIpConfig) -> Self {
        Self::new(&geo.remote_url, geo.timeout())
    }

    /// Build the lookup URL for `ip` / 构造查询地址
    pub fn lookup_url(&self, ip: IpAddr) -> Result<url::Url> {
        let raw = self.url_template.replace("{ip}", &ip.to_string());
        url::Url::parse(&raw).map_err(|e| GatewayError::Geolocation(e.to_string()))
    }

    pub async fn country_code(&self, ip: IpAddr) -> Result<String> {
        let url = self.lookup_url(ip)?;
        let request = async {
            let response = self
                .client
                .get(url)
                .header("User-Agent", "globaledu-backend")
                .send()
                .await
                .map_err(|e| GatewayError::Geolocation(e.to_string()))?
                .error_for_status()
                .map_err(|e| GatewayError::Geolocation(e.to_string()))?;
            response
                .json::<RemoteAnswer>()
                .await
                .map_err(|e| GatewayError::Geolocation(e.to_string()))
        };

        let answer = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GatewayError::Geolocation(format!("timed out after {:?}", self.timeout)))??;

        answer
            .country_code
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GatewayError::Geolocation("no country_code in answer".to_string()))
    }
}

/// Combined detector: database first, remote second / 组合识别器
pub struct GeoLocator {
    manager: Arc<RwLock<GeoIpManager>>,
    remote: Option<RemoteLocator>,
}

impl GeoLocator {
    pub fn new(manager: Arc<RwLock<GeoIpManager>>, remote: Option<RemoteLocator>) -> Self {
        Self { manager, remote }
    }

    pub fn from_config(geo: &GeoIpConfig) -> Self {
        let remote = geo.remote_enabled.then(|| RemoteLocator::from_config(geo));
        Self::new(get_geoip_manager(), remote)
    }

    pub async fn detect(&self, ip: Option<IpAddr>) -> Detection {
        let Some(ip) = ip else {
            return Detection::unknown(GeoSource::None);
        };
        if is_private_ip(&ip) {
            return Detection::unknown(GeoSource::Private);
        }

        let local = self.manager.read().get_country_code(ip);
        if let Some(code) = local {
            return Detection {
                country: Country::from_code(&code),
                source: GeoSource::Database,
            };
        }

        let Some(remote) = &self.remote else {
            return Detection::unknown(GeoSource::None);
        };
        match remote.country_code(ip).await {
            Ok(code) => Detection {
                country: Country::from_code(&code),
                source: GeoSource::Remote,
            },
            Err(e) => {
                tracing::warn!("Remote geolocation for {} failed: {}", ip, e);
                Detection::unknown(GeoSource::None)
            }
        }
    }
}

static GEOIP_MANAGER: OnceCell<Arc<RwLock<GeoIpManager>>> = OnceCell::new();

pub fn get_geoip_manager() -> Arc<RwLock<GeoIpManager>> {
    GEOIP_MANAGER
        .get_or_init(|| {
            let mut manager = GeoIpManager::new();
            manager.load_from_dir(config::config().get_geoip_dir());
            Arc::new(RwLock::new(manager))
        })
        .clone()
}
