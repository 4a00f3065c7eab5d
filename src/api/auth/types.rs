use serde::{Deserialize, Serialize};

use globaledu_backend::session::Profile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address or phone number / 邮箱或手机号
    #[serde(alias = "email_or_phone")]
    pub email_or_phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user: Profile,
    pub login_time: chrono::DateTime<chrono::Utc>,
    pub expires_at: i64,
}
