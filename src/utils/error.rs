use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeChatError {
    #[error("errcode: {code}, msg: {message}")]
    ApiError { code: i64, message: String },

    #[error("Invalid input: {message}")]
    UserError { message: String },

    #[error("Access token unavailable: {message}")]
    TokenError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Input,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WeChatError {
    /// Turns a WeChat JSON body carrying a non-zero `errcode` into `ApiError`.
    ///
    /// Bodies without `errcode`, or with `errcode: 0`, pass through.
    pub fn check_response(data: &Value) -> Result<()> {
        let code = match data.get("errcode") {
            Some(code) => code
                .as_i64()
                .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
                .unwrap_or(-1),
            None => return Ok(()),
        };

        if code == 0 {
            return Ok(());
        }

        let message = data
            .get("errmsg")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();

        tracing::warn!("WeChat API returned errcode {}: {}", code, message);
        Err(WeChatError::ApiError { code, message })
    }

    pub fn user(message: impl Into<String>) -> Self {
        WeChatError::UserError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WeChatError::ApiError { .. } | WeChatError::TokenError { .. } => ErrorCategory::Remote,
            WeChatError::UserError { .. } => ErrorCategory::Input,
            WeChatError::HttpError(_) => ErrorCategory::Network,
            WeChatError::ConfigError { .. }
            | WeChatError::MissingConfigError { .. }
            | WeChatError::InvalidConfigValueError { .. }
            | WeChatError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            WeChatError::IoError(_) | WeChatError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            WeChatError::ApiError { code: 40001, .. } | WeChatError::ApiError { code: 42001, .. } => {
                "The access token is invalid or expired; fetch a new one and retry".to_string()
            }
            WeChatError::ApiError { code: 40125, .. } => {
                "Check that app_secret matches the one in the WeChat admin console".to_string()
            }
            WeChatError::ApiError { code: -1, .. } => {
                "WeChat is busy; retry the request later".to_string()
            }
            WeChatError::ApiError { code, .. } => {
                format!("Look up errcode {} in the WeChat global return codes", code)
            }
            WeChatError::UserError { .. } => "Check the arguments passed to the call".to_string(),
            WeChatError::TokenError { .. } => {
                "Verify app_id and app_secret, and that this server's IP is whitelisted".to_string()
            }
            WeChatError::HttpError(_) => {
                "Check network connectivity and the configured endpoint bases".to_string()
            }
            WeChatError::ConfigError { .. }
            | WeChatError::MissingConfigError { .. }
            | WeChatError::InvalidConfigValueError { .. }
            | WeChatError::ConfigValidationError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            WeChatError::IoError(_) => "Check file paths and permissions".to_string(),
            WeChatError::SerializationError(_) => {
                "The response could not be parsed; enable --verbose to inspect it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WeChatError::ApiError { code, message } => {
                format!("WeChat rejected the request ({}): {}", code, message)
            }
            WeChatError::HttpError(_) => "Could not reach the WeChat API".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WeChatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_response_raises_on_nonzero_errcode() {
        let data = json!({"errcode": 40013, "errmsg": "invalid appid"});

        match WeChatError::check_response(&data) {
            Err(WeChatError::ApiError { code, message }) => {
                assert_eq!(code, 40013);
                assert_eq!(message, "invalid appid");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_check_response_passes_zero_and_missing_errcode() {
        assert!(WeChatError::check_response(&json!({"errcode": 0, "errmsg": "ok"})).is_ok());
        assert!(WeChatError::check_response(&json!({"openid": "o1"})).is_ok());
    }

    #[test]
    fn test_check_response_without_errmsg() {
        let err = WeChatError::check_response(&json!({"errcode": "45009"})).unwrap_err();
        assert_eq!(err.to_string(), "errcode: 45009, msg: ");
    }

    #[test]
    fn test_severity_by_category() {
        let api = WeChatError::ApiError {
            code: 40001,
            message: "invalid credential".to_string(),
        };
        assert_eq!(api.category(), ErrorCategory::Remote);
        assert_eq!(api.severity(), ErrorSeverity::Medium);
        assert!(api.recovery_suggestion().contains("access token"));

        let config = WeChatError::MissingConfigError {
            field: "wechat.app_id".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::High);
    }
}
