use crate::config::app_config::WhopConfig;
use crate::domain::model::{UserId, WhopUser};
use crate::domain::ports::IdentityProvider;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "whop";

#[derive(Debug, Deserialize)]
struct MeResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    username: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessResponse {
    has_access: bool,
}

/// Whop REST API 的身分與權限查詢
pub struct WhopClient {
    client: Client,
    base_url: String,
    api_key: String,
    demo_user_id: Option<String>,
}

impl WhopClient {
    pub fn new(config: &WhopConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            demo_user_id: None,
        })
    }

    /// 沒有使用者 token 時以示範帳號代替
    pub fn with_demo_user(mut self, demo_user_id: Option<String>) -> Self {
        self.demo_user_id = demo_user_id.filter(|id| !id.trim().is_empty());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v5/{}", self.base_url, path)
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::external(
            SERVICE,
            format!("unexpected status {}: {}", status, body.trim()),
        ))
    }
}

#[async_trait]
impl IdentityProvider for WhopClient {
    async fn verify_user(&self, token: Option<&str>) -> Result<Option<UserId>> {
        let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                if let Some(demo) = &self.demo_user_id {
                    tracing::info!("No user token supplied, using demo user {}", demo);
                }
                return Ok(self.demo_user_id.clone().map(UserId::new));
            }
        };

        tracing::debug!("Verifying user token against {}", self.url("me"));
        let response = self
            .client
            .get(self.url("me"))
            .bearer_auth(token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            tracing::debug!("User token rejected: {}", response.status());
            return Ok(None);
        }

        let me: MeResponse = Self::ensure_success(response).await?.json().await?;
        Ok(Some(UserId::new(me.id)))
    }

    async fn check_access(&self, user_id: &UserId, access_pass_id: &str) -> Result<bool> {
        let url = self.url(&format!("access_passes/{}/access", access_pass_id));
        tracing::debug!("Checking access for {} at {}", user_id, url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("user_id", user_id.as_str())])
            .send()
            .await?;

        let access: AccessResponse = Self::ensure_success(response).await?.json().await?;
        Ok(access.has_access)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<WhopUser>> {
        let response = self
            .client
            .get(self.url(&format!("users/{}", user_id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let user: UserResponse = Self::ensure_success(response).await?.json().await?;
        Ok(Some(WhopUser {
            id: UserId::new(user.id),
            username: user.username.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
        }))
    }
}
