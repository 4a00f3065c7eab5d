//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{GatewayError, Result};

/// Global configuration instance / 全局配置实例
static CONFIG: OnceCell<Arc<RwLock<AppConfig>>> = OnceCell::new();

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// GeoIP configuration / GeoIP配置
    pub geoip: GeoIpConfig,
    /// Contact handoff configuration / 联系方式配置
    pub contact: ContactConfig,
    /// Session configuration / 会话配置
    pub auth: AuthConfig,
    /// Job scraper configuration / 职位抓取配置
    pub scraper: ScraperConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// GeoIP configuration / GeoIP配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoIpConfig {
    /// Directory holding GeoLite2 *.mmdb files / GeoIP数据库目录
    pub db_dir: String,
    /// Ask the remote provider when the local database has no answer / 启用远程查询
    pub remote_enabled: bool,
    /// Remote lookup URL, `{ip}` is replaced by the visitor address / 远程查询地址
    pub remote_url: String,
    /// Remote lookup timeout in milliseconds / 远程查询超时
    pub timeout_ms: u64,
}

/// Contact handoff configuration / 联系方式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// WhatsApp number in international format without `+` / WhatsApp号码
    pub whatsapp_number: String,
}

/// Session configuration / 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Password accepted by the demo login / 演示登录密码
    pub demo_password: String,
    /// HMAC key for session tokens, random per process when empty / 会话签名密钥
    pub session_secret: String,
    /// Session lifetime in hours / 会话有效期（小时）
    pub session_ttl_hours: i64,
}

/// Job scraper configuration / 职位抓取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Upper bound for a single scrape call / 单次抓取超时
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8180,
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            db_dir: "data".to_string(),
            remote_enabled: true,
            remote_url: "https://ipapi.co/{ip}/json/".to_string(),
            timeout_ms: 1500,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "8801234567890".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_password: "demo123".to_string(),
            session_secret: String::new(),
            session_ttl_hours: 7 * 24,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

impl GeoIpConfig {
    /// Remote lookup timeout / 远程查询超时
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Get the GeoIP database directory / 获取GeoIP数据库目录
    pub fn get_geoip_dir(&self) -> PathBuf {
        PathBuf::from(&self.geoip.db_dir)
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn scraper_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scraper.timeout_ms)
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<AppConfig> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = serde_json::from_str(&content)?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, config_path)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;
    Ok(())
}

/// Initialize global configuration / 初始化全局配置
pub fn init_config(config: AppConfig) -> Result<Arc<RwLock<AppConfig>>> {
    let config_arc = Arc::new(RwLock::new(config));

    CONFIG
        .set(config_arc.clone())
        .map_err(|_| GatewayError::ConfigInitialized)?;

    Ok(config_arc)
}

/// Get global configuration instance / 获取全局配置实例
pub fn get_config() -> Arc<RwLock<AppConfig>> {
    CONFIG
        .get_or_init(|| {
            let config = load_config().unwrap_or_default();
            Arc::new(RwLock::new(config))
        })
        .clone()
}

/// Get a read-only snapshot of current config / 获取当前配置的只读快照
pub fn config() -> AppConfig {
    get_config().read().clone()
}
