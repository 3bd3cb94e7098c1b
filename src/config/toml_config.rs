use crate::domain::ports::{SettingsProvider, DEFAULT_API_BASE, DEFAULT_OPEN_BASE, DEFAULT_PAY_BASE};
use crate::utils::error::{WeChatError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeChatConfig {
    pub wechat: AccountConfig,
    pub endpoints: Option<EndpointsConfig>,
    pub http: Option<HttpConfig>,
    pub token: Option<TokenConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub app_id: String,
    pub app_secret: String,
    pub register_url: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub api_base: Option<String>,
    pub pay_base: Option<String>,
    pub open_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// 在微信回報的過期時間前多少秒就重新取得 token
    pub safety_margin_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

impl WeChatConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WeChatError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，先替換 `${VAR}` 環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WeChatError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 驗證帳號資訊
        validate_non_empty_string("wechat.app_id", &self.wechat.app_id)?;
        validate_non_empty_string("wechat.app_secret", &self.wechat.app_secret)?;
        if self.wechat.app_id.contains("${") {
            return Err(WeChatError::MissingConfigError {
                field: "wechat.app_id".to_string(),
            });
        }
        if self.wechat.app_secret.contains("${") {
            return Err(WeChatError::MissingConfigError {
                field: "wechat.app_secret".to_string(),
            });
        }

        // 驗證 URL
        validate_url("wechat.register_url", &self.wechat.register_url)?;
        validate_url("wechat.redirect_url", &self.wechat.redirect_url)?;
        validate_url("endpoints.api_base", self.api_base())?;
        validate_url("endpoints.pay_base", self.pay_base())?;
        validate_url("endpoints.open_base", self.open_base())?;

        validate_range("http.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validate_range(
            "token.safety_margin_seconds",
            self.token_safety_margin_seconds(),
            0,
            3600,
        )?;

        Ok(())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or(LogFormat::Compact)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl SettingsProvider for WeChatConfig {
    fn app_id(&self) -> &str {
        &self.wechat.app_id
    }

    fn app_secret(&self) -> &str {
        &self.wechat.app_secret
    }

    fn register_url(&self) -> &str {
        &self.wechat.register_url
    }

    fn redirect_url(&self) -> &str {
        &self.wechat.redirect_url
    }

    fn api_base(&self) -> &str {
        self.endpoints
            .as_ref()
            .and_then(|e| e.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
    }

    fn pay_base(&self) -> &str {
        self.endpoints
            .as_ref()
            .and_then(|e| e.pay_base.as_deref())
            .unwrap_or(DEFAULT_PAY_BASE)
    }

    fn open_base(&self) -> &str {
        self.endpoints
            .as_ref()
            .and_then(|e| e.open_base.as_deref())
            .unwrap_or(DEFAULT_OPEN_BASE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.as_ref().and_then(|h| h.timeout_seconds).unwrap_or(10)
    }

    fn token_safety_margin_seconds(&self) -> i64 {
        self.token
            .as_ref()
            .and_then(|t| t.safety_margin_seconds)
            .unwrap_or(300)
    }
}

impl Validate for WeChatConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
