//! Demo login and signed session tokens / 演示登录与会话令牌
//!
//! Token layout: `base64url(claims json)` `.` `hex(hmac-sha256 of the first part)`.
//! Nothing is stored server side; the token carries its own expiry.

use axum::http::{header, HeaderMap};
use base64::prelude::*;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::AuthConfig;
use crate::error::{GatewayError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Longest accepted session lifetime, one year / 会话最长有效期
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Logged-in visitor / 登录用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Profile {
    /// Profile derived from the login identifier / 由登录标识生成资料
    ///
    /// An email gives its local part as name; anything else is treated as a
    /// phone number with a placeholder email.
    pub fn from_identifier(identifier: &str) -> Self {
        let identifier = identifier.trim();
        match identifier.split_once('@') {
            Some((local, _)) => Self {
                name: if local.is_empty() { "Student".to_string() } else { local.to_string() },
                email: identifier.to_string(),
                phone: None,
            },
            None => Self {
                name: "Student".to_string(),
                email: format!("{}@example.com", identifier),
                phone: Some(identifier.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub profile: Profile,
    pub login_time: DateTime<Utc>,
    /// Expiry as a unix timestamp / 过期时间
    pub exp: i64,
}

/// Check demo credentials / 校验演示账号
pub fn demo_login(identifier: &str, password: &str, demo_password: &str) -> Option<Profile> {
    if identifier.trim().is_empty() || password != demo_password {
        return None;
    }
    Some(Profile::from_identifier(identifier))
}

/// Signing key and lifetime for session tokens / 会话签名密钥
#[derive(Clone)]
pub struct SessionKeys {
    key: Vec<u8>,
    ttl: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self { key: secret.to_vec(), ttl }
    }

    /// Random 32-byte key, valid for this process only / 随机密钥
    pub fn random(ttl: chrono::Duration) -> Self {
        let mut key = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key, ttl }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        let hours = auth.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        if hours != auth.session_ttl_hours {
            tracing::warn!(
                "auth.session_ttl_hours={} is out of range, using {}",
                auth.session_ttl_hours,
                hours
            );
        }
        let ttl = chrono::Duration::hours(hours);
        if auth.session_secret.is_empty() {
            tracing::warn!("auth.session_secret is empty, sessions will not survive a restart");
            Self::random(ttl)
        } else {
            Self::new(auth.session_secret.as_bytes(), ttl)
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| GatewayError::MalformedToken)
    }

    pub fn issue(&self, profile: Profile, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            profile,
            login_time: now,
            exp: now
                .checked_add_signed(self.ttl)
                .ok_or_else(|| GatewayError::TokenEncoding("session expiry out of range".to_string()))?
                .timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        let json = serde_json::to_vec(claims).map_err(|e| GatewayError::TokenEncoding(e.to_string()))?;
        let payload = BASE64_URL_SAFE_NO_PAD.encode(json);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        Ok(format!("{}.{}", payload, hex::encode(mac.finalize().into_bytes())))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let (payload, signature) = token.trim().split_once('.').ok_or(GatewayError::MalformedToken)?;
        let signature = hex::decode(signature).map_err(|_| GatewayError::MalformedToken)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| GatewayError::BadSignature)?;

        let raw = BASE64_URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| GatewayError::MalformedToken)?;
        let claims: Claims = serde_json::from_slice(&raw).map_err(|_| GatewayError::MalformedToken)?;

        if claims.exp <= now.timestamp() {
            return Err(GatewayError::SessionExpired);
        }
        Ok(claims)
    }
}

/// Token from the session cookie, or an `Authorization: Bearer` header / 提取会话令牌
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| key.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string());
    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
