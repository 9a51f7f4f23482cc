use crate::domain::model::{UserId, WhopUser};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部平台的身分與權限服務
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 驗證使用者 token；無效的 token 回傳 `Ok(None)`
    async fn verify_user(&self, token: Option<&str>) -> Result<Option<UserId>>;

    /// 使用者是否持有指定的 access pass
    async fn check_access(&self, user_id: &UserId, access_pass_id: &str) -> Result<bool>;

    async fn get_user(&self, user_id: &UserId) -> Result<Option<WhopUser>>;
}

/// 使用紀錄。呼叫端不等待、不處理錯誤。
pub trait UsageTracker: Send + Sync {
    fn record(&self, event: &str, metadata: serde_json::Value);
}
