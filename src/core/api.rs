use crate::core::token::{request_global_token, CachedTokenProvider};
use crate::domain::ports::{SettingsProvider, TokenProvider};
use crate::utils::error::{Result, WeChatError};
use crate::utils::validation::require_argument;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// WeChat Official Account API client.
///
/// Methods pass parameters to WeChat and hand back what WeChat returns.
/// Most return the decoded JSON untouched, `errcode` included; the few that
/// check the body say so in their docs.
pub struct WeChatApi<C: SettingsProvider> {
    settings: C,
    client: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl<C: SettingsProvider> WeChatApi<C> {
    /// Client with a [`CachedTokenProvider`] sharing the same HTTP client.
    pub fn new(settings: C) -> Result<Self> {
        let client = build_client(&settings)?;
        let tokens = Arc::new(CachedTokenProvider::new(&settings, client.clone()));
        Ok(Self {
            settings,
            client,
            tokens,
        })
    }

    pub fn with_token_provider(settings: C, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let client = build_client(&settings)?;
        Ok(Self {
            settings,
            client,
            tokens,
        })
    }

    pub fn settings(&self) -> &C {
        &self.settings
    }

    pub fn token_provider(&self) -> Arc<dyn TokenProvider> {
        Arc::clone(&self.tokens)
    }

    /// URL that WeChat 302-redirects back to with a `code`.
    ///
    /// A given `redirect_url` is taken relative to the register URL: its
    /// first character (the leading `/`) is dropped before joining.
    pub fn get_code_url(&self, redirect_url: Option<&str>, state: &str) -> String {
        let redirect_uri = match redirect_url.filter(|r| !r.is_empty()) {
            Some(path) => {
                let relative = path.chars().skip(1).collect::<String>();
                let joined = format!("{}{}", self.settings.register_url(), relative);
                urlencoding::encode(&joined).into_owned()
            }
            None => self.settings.redirect_url().to_string(),
        };

        format!(
            "{}/connect/oauth2/authorize?appid={}&redirect_uri={}&response_type=code&scope=snsapi_userinfo&state={}#wechat_redirect",
            self.settings.open_base().trim_end_matches('/'),
            self.settings.app_id(),
            redirect_uri,
            state
        )
    }

    /// Exchanges an OAuth `code` for a user access token, refresh token and openid.
    pub async fn get_access_token(&self, code: &str) -> Result<Value> {
        require_argument("code", code)?;
        self.get_json(
            &self.api_url("/sns/oauth2/access_token"),
            &[
                ("appid", self.settings.app_id()),
                ("secret", self.settings.app_secret()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ],
        )
        .await
    }

    /// Refreshes a user access token. Raises `ApiError` on a non-zero errcode.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<Value> {
        require_argument("refresh_token", refresh_token)?;
        let data = self
            .get_json(
                &self.api_url("/sns/oauth2/refresh_token"),
                &[
                    ("appid", self.settings.app_id()),
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                ],
            )
            .await?;

        WeChatError::check_response(&data)?;
        Ok(data)
    }

    /// User info via the global token, including subscribe, language,
    /// remark and groupid. Raises `ApiError` on a non-zero errcode.
    pub async fn get_userinfo(&self, openid: &str) -> Result<Value> {
        require_argument("openid", openid)?;
        let access_token = self.tokens.access_token().await?;
        let data = self
            .get_json(
                &self.api_url("/cgi-bin/user/info"),
                &[
                    ("access_token", access_token.as_str()),
                    ("openid", openid),
                    ("lang", "zh_CN"),
                ],
            )
            .await?;

        WeChatError::check_response(&data)?;
        Ok(data)
    }

    /// Raises `ApiError` on a non-zero errcode.
    pub async fn set_user_remark(&self, openid: &str, remark: &str) -> Result<()> {
        require_argument("openid", openid)?;
        let data = self
            .post_with_token(
                "/cgi-bin/user/info/updateremark",
                &json!({ "openid": openid, "remark": remark }),
            )
            .await?;

        WeChatError::check_response(&data)
    }

    /// User info via the user's OAuth token; no subscribe, language,
    /// remark or groupid.
    pub async fn get_userinfo_by_token(&self, openid: &str, access_token: &str) -> Result<Value> {
        require_argument("openid", openid)?;
        let url = self.api_url("/sns/userinfo");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", access_token),
                ("openid", openid),
                ("lang", "zh_CN"),
            ])
            .send()
            .await?;

        // WeChat omits the charset here; the body is always UTF-8.
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Raw `/cgi-bin/token` response; does not touch the token provider.
    pub async fn get_global_access_token(&self) -> Result<Value> {
        request_global_token(
            &self.client,
            self.settings.api_base().trim_end_matches('/'),
            self.settings.app_id(),
            self.settings.app_secret(),
        )
        .await
    }

    /// IP addresses of WeChat's callback servers.
    pub async fn get_wechat_servers_list(&self) -> Result<Value> {
        let url = self.api_url("/cgi-bin/getcallbackip");
        let access_token = self.tokens.access_token().await?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("access_token", access_token.as_str())])
            .send()
            .await?;
        Ok(response.json().await?)
    }

    pub async fn create_short_url(&self, long_url: &str) -> Result<Value> {
        require_argument("long_url", long_url)?;
        self.post_with_token(
            "/cgi-bin/shorturl",
            &json!({ "action": "long2short", "long_url": long_url }),
        )
        .await
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api_base().trim_end_matches('/'), path)
    }

    pub(crate) fn pay_url(&self, path: &str) -> String {
        format!("{}{}", self.settings.pay_base().trim_end_matches('/'), path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        tracing::debug!("API response status: {}", response.status());
        Ok(response.json().await?)
    }

    /// GET an `api_base` path with the global token attached.
    pub(crate) async fn get_with_token(&self, path: &str) -> Result<Value> {
        let access_token = self.tokens.access_token().await?;
        self.get_json(&self.api_url(path), &[("access_token", access_token.as_str())])
            .await
    }

    /// POST a JSON body to an `api_base` path with the global token attached.
    pub(crate) async fn post_with_token<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        let url = self.api_url(path);
        let access_token = self.tokens.access_token().await?;
        tracing::debug!("POST {}", url);

        // serde_json leaves non-ASCII text unescaped, which menu names rely on.
        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .post(&url)
            .query(&[("access_token", access_token.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(payload)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        Ok(response.json().await?)
    }
}

fn build_client<C: SettingsProvider>(settings: &C) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds()))
        .build()?)
}
