//! Client for the WeChat Official Account HTTP API.
//!
//! [`WeChatApi`] builds request URLs and payloads, sends them and returns
//! what WeChat answers. The global access token comes from an injected
//! [`TokenProvider`]; by default a [`CachedTokenProvider`] fetches it on
//! demand and keeps it until shortly before expiry.
//!
//! ```rust,no_run
//! use wego::{WeChatApi, WeChatConfig};
//!
//! # async fn run() -> wego::Result<()> {
//! let config = WeChatConfig::from_file("wego.toml")?;
//! let api = WeChatApi::new(config)?;
//! let menus = api.get_menus().await?;
//! println!("{}", menus);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{LogFormat, WeChatConfig};

pub use crate::core::{
    api::WeChatApi,
    token::{CachedTokenProvider, StaticTokenProvider},
    xml::XmlValue,
};
pub use domain::model::AccessToken;
pub use domain::ports::{SettingsProvider, TokenProvider};
pub use utils::error::{WeChatError, Result};
