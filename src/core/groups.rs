//! User group management. Responses are returned as WeChat sends them.

use crate::core::api::WeChatApi;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::validation::require_argument;
use serde_json::{json, Value};

impl<C: SettingsProvider> WeChatApi<C> {
    pub async fn get_all_groups(&self) -> Result<Value> {
        self.get_with_token("/cgi-bin/groups/get").await
    }

    pub async fn create_group(&self, name: &str) -> Result<Value> {
        require_argument("name", name)?;
        self.post_with_token("/cgi-bin/groups/create", &json!({ "group": { "name": name } }))
            .await
    }

    pub async fn change_group_name(&self, group_id: i64, name: &str) -> Result<Value> {
        require_argument("name", name)?;
        self.post_with_token(
            "/cgi-bin/groups/update",
            &json!({ "group": { "id": group_id, "name": name } }),
        )
        .await
    }

    /// Moves a user into another group.
    pub async fn change_user_group(&self, openid: &str, group_id: i64) -> Result<Value> {
        require_argument("openid", openid)?;
        self.post_with_token(
            "/cgi-bin/groups/members/update",
            &json!({ "openid": openid, "to_groupid": group_id }),
        )
        .await
    }

    pub async fn del_group(&self, group_id: i64) -> Result<Value> {
        self.post_with_token("/cgi-bin/groups/delete", &json!({ "group": { "id": group_id } }))
            .await
    }
}
