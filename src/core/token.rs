use crate::domain::model::AccessToken;
use crate::domain::ports::{SettingsProvider, TokenProvider};
use crate::utils::error::{Result, WeChatError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;

const DEFAULT_EXPIRES_IN: i64 = 7200;

/// Raw `/cgi-bin/token` call shared by the provider and `WeChatApi`.
pub(crate) async fn request_global_token(
    client: &Client,
    api_base: &str,
    app_id: &str,
    app_secret: &str,
) -> Result<Value> {
    let url = format!("{}/cgi-bin/token", api_base);
    tracing::debug!("Requesting global access token from: {}", url);

    let response = client
        .get(&url)
        .query(&[
            ("grant_type", "client_credential"),
            ("appid", app_id),
            ("secret", app_secret),
        ])
        .send()
        .await?;

    tracing::debug!("Token response status: {}", response.status());
    Ok(response.json().await?)
}

/// Fetches the global token on demand and holds it until it nears expiry.
pub struct CachedTokenProvider {
    client: Client,
    api_base: String,
    app_id: String,
    app_secret: String,
    safety_margin_seconds: i64,
    current: RwLock<Option<AccessToken>>,
}

impl CachedTokenProvider {
    pub fn new<C: SettingsProvider>(settings: &C, client: Client) -> Self {
        Self {
            client,
            api_base: settings.api_base().trim_end_matches('/').to_string(),
            app_id: settings.app_id().to_string(),
            app_secret: settings.app_secret().to_string(),
            safety_margin_seconds: settings.token_safety_margin_seconds(),
            current: RwLock::new(None),
        }
    }

    /// Token currently held, if any, fresh or not.
    pub async fn cached(&self) -> Option<AccessToken> {
        self.current.read().await.clone()
    }

    async fn fetch(&self) -> Result<AccessToken> {
        let data =
            request_global_token(&self.client, &self.api_base, &self.app_id, &self.app_secret)
                .await?;
        WeChatError::check_response(&data)?;

        let value = data
            .get("access_token")
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| WeChatError::TokenError {
                message: format!("response has no access_token: {}", data),
            })?;
        let expires_in = data
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_EXPIRES_IN);

        tracing::info!("🔑 Fetched global access token (expires in {}s)", expires_in);
        Ok(AccessToken::new(value, expires_in))
    }
}

#[async_trait]
impl TokenProvider for CachedTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.current.read().await.as_ref() {
            if token.is_fresh(self.safety_margin_seconds) {
                return Ok(token.value.clone());
            }
        }

        let mut current = self.current.write().await;
        // 等鎖期間可能已有其他呼叫者更新過 token
        if let Some(token) = current.as_ref() {
            if token.is_fresh(self.safety_margin_seconds) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch().await?;
        let value = token.value.clone();
        *current = Some(token);
        Ok(value)
    }

    async fn invalidate(&self) {
        tracing::debug!("Dropping cached global access token");
        *self.current.write().await = None;
    }
}

/// Token managed outside this crate, e.g. by a central token server.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }

    async fn invalidate(&self) {}
}
