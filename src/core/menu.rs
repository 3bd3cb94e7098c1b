use crate::core::api::WeChatApi;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::validation::require_argument;
use serde_json::{json, Value};

impl<C: SettingsProvider> WeChatApi<C> {
    /// `menu` is the full `{"button": [...]}` document.
    pub async fn create_menu(&self, menu: &Value) -> Result<Value> {
        self.post_with_token("/cgi-bin/menu/create", menu).await
    }

    /// Like [`create_menu`](Self::create_menu) with a `matchrule` section.
    pub async fn create_conditional_menu(&self, menu: &Value) -> Result<Value> {
        self.post_with_token("/cgi-bin/menu/addconditional", menu)
            .await
    }

    pub async fn get_menus(&self) -> Result<Value> {
        self.get_with_token("/cgi-bin/menu/get").await
    }

    /// Deletes every menu, conditional menus included.
    pub async fn del_all_menus(&self) -> Result<Value> {
        let data = self.get_with_token("/cgi-bin/menu/delete").await?;
        tracing::info!("🗑️ Deleted all menus: {}", data);
        Ok(data)
    }

    pub async fn del_conditional_menu(&self, menu_id: &str) -> Result<Value> {
        require_argument("menu_id", menu_id)?;
        self.post_with_token("/cgi-bin/menu/delconditional", &json!({ "menuid": menu_id }))
            .await
    }

    /// Which menu a given user (openid or WeChat id) would see.
    pub async fn check_personalized_menu_match(&self, user_id: &str) -> Result<Value> {
        require_argument("user_id", user_id)?;
        self.post_with_token("/cgi-bin/menu/trymatch", &json!({ "user_id": user_id }))
            .await
    }
}
