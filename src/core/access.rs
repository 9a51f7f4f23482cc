use crate::domain::model::{UserId, WhopUser};
use crate::domain::ports::{IdentityProvider, UsageTracker};
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Granted(Grant),
    Denied { reason: String },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }

    /// 把拒絕轉成錯誤，方便以 `?` 傳遞
    pub fn into_result(self) -> Result<Grant> {
        match self {
            AccessDecision::Granted(grant) => Ok(grant),
            AccessDecision::Denied { reason } => Err(AppError::AccessDeniedError { reason }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    pub user_id: Option<UserId>,
    pub user: Option<WhopUser>,
    /// 權限服務出錯但依政策仍放行
    pub fail_open: bool,
}

/// 在顯示計算器之前檢查使用者的 access pass。
///
/// 身分或權限服務本身失敗時，依 `fail_open_on_entitlement_error` 決定放行或拒絕。
pub struct AccessGate<I: IdentityProvider, T: UsageTracker> {
    identity: I,
    tracker: T,
    access_pass_id: String,
    fail_open_on_entitlement_error: bool,
}

impl<I: IdentityProvider, T: UsageTracker> AccessGate<I, T> {
    pub fn new(
        identity: I,
        tracker: T,
        access_pass_id: impl Into<String>,
        fail_open_on_entitlement_error: bool,
    ) -> Self {
        Self {
            identity,
            tracker,
            access_pass_id: access_pass_id.into(),
            fail_open_on_entitlement_error,
        }
    }

    pub fn fail_open(&self) -> bool {
        self.fail_open_on_entitlement_error
    }

    pub async fn authorize(&self, token: Option<&str>) -> AccessDecision {
        match self.check(token).await {
            Ok(decision) => decision,
            Err(e) if self.fail_open_on_entitlement_error => {
                tracing::warn!("⚠️ Entitlement check failed, allowing access (fail-open): {}", e);
                AccessDecision::Granted(Grant {
                    user_id: None,
                    user: None,
                    fail_open: true,
                })
            }
            Err(e) => {
                tracing::error!("❌ Entitlement check failed, denying access: {}", e);
                AccessDecision::Denied {
                    reason: format!("entitlement check failed: {}", e),
                }
            }
        }
    }

    async fn check(&self, token: Option<&str>) -> Result<AccessDecision> {
        let Some(user_id) = self.identity.verify_user(token).await? else {
            tracing::info!("🔒 No verified Whop user");
            return Ok(AccessDecision::Denied {
                reason: "user could not be verified".to_string(),
            });
        };

        let has_access = self
            .identity
            .check_access(&user_id, &self.access_pass_id)
            .await?;
        if !has_access {
            tracing::info!(
                "🔒 User {} lacks access pass {}",
                user_id,
                self.access_pass_id
            );
            return Ok(AccessDecision::Denied {
                reason: format!("user has no access to {}", self.access_pass_id),
            });
        }

        // 取得使用者資料失敗不影響放行
        let user = match self.identity.get_user(&user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Could not fetch profile for {}: {}", user_id, e);
                None
            }
        };

        self.tracker.record(
            "app_opened",
            serde_json::json!({
                "userId": user_id.as_str(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        );

        tracing::info!("✅ Access granted to {}", user_id);
        Ok(AccessDecision::Granted(Grant {
            user_id: Some(user_id),
            user,
            fail_open: false,
        }))
    }
}
