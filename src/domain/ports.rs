use crate::utils::error::Result;
use async_trait::async_trait;

pub const DEFAULT_API_BASE: &str = "https://api.weixin.qq.com";
pub const DEFAULT_PAY_BASE: &str = "https://api.mch.weixin.qq.com";
pub const DEFAULT_OPEN_BASE: &str = "https://open.weixin.qq.com";

/// Application credentials and endpoint locations.
pub trait SettingsProvider: Send + Sync {
    fn app_id(&self) -> &str;
    fn app_secret(&self) -> &str;
    /// Site root that relative OAuth redirect paths are appended to.
    fn register_url(&self) -> &str;
    /// Redirect used when the caller does not pass one.
    fn redirect_url(&self) -> &str;

    fn api_base(&self) -> &str {
        DEFAULT_API_BASE
    }

    fn pay_base(&self) -> &str {
        DEFAULT_PAY_BASE
    }

    fn open_base(&self) -> &str {
        DEFAULT_OPEN_BASE
    }

    fn timeout_seconds(&self) -> u64 {
        10
    }

    fn token_safety_margin_seconds(&self) -> i64 {
        300
    }
}

/// Source of the global access token.
///
/// `access_token` returns a token that is valid right now, fetching a new
/// one if the held token is missing or inside its expiry margin.
/// `invalidate` drops the held token so the next call fetches again, for
/// use after WeChat reports the token as invalid (errcode 40001/42001).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
    async fn invalidate(&self);
}
