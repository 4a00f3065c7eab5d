//! Library error type / 库错误类型
//!
//! Handlers in the binary map these into `(StatusCode, Json<Value>)` pairs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config already initialized")]
    ConfigInitialized,

    #[error("failed to encode session token: {0}")]
    TokenEncoding(String),

    #[error("malformed session token")]
    MalformedToken,

    #[error("session token signature mismatch")]
    BadSignature,

    #[error("session expired")]
    SessionExpired,

    #[error("geolocation lookup failed: {0}")]
    Geolocation(String),

    #[error("job scraper failed: {0}")]
    Scraper(String),
}

impl GatewayError {
    /// Token problems are all reported to clients as "unauthorized" / 会话错误统一按未授权处理
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedToken | GatewayError::BadSignature | GatewayError::SessionExpired
        )
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
