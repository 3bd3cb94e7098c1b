#![allow(dead_code)]

use httpmock::MockServer;
use std::sync::Arc;
use wego::{StaticTokenProvider, WeChatApi, WeChatConfig};

pub const APP_ID: &str = "wx0123456789";
pub const APP_SECRET: &str = "s3cret";
pub const TOKEN: &str = "GLOBAL_TOKEN";

/// Config with every endpoint base pointed at the mock server.
pub fn config_for(server: &MockServer) -> WeChatConfig {
    let base = server.base_url();
    WeChatConfig::from_toml_str(&format!(
        r#"
[wechat]
app_id = "{APP_ID}"
app_secret = "{APP_SECRET}"
register_url = "https://example.com/"
redirect_url = "https://example.com/wechat/callback"

[endpoints]
api_base = "{base}"
pay_base = "{base}"
open_base = "{base}"

[http]
timeout_seconds = 5
"#
    ))
    .expect("test config parses")
}

/// Client whose global token is fixed to [`TOKEN`].
pub fn api_for(server: &MockServer) -> WeChatApi<WeChatConfig> {
    WeChatApi::with_token_provider(config_for(server), Arc::new(StaticTokenProvider::new(TOKEN)))
        .expect("client builds")
}
