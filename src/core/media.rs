//! Permanent materials and parametric QR codes.

use crate::core::api::WeChatApi;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::validation::require_argument;
use serde_json::{json, Value};

impl<C: SettingsProvider> WeChatApi<C> {
    /// Lists permanent materials of `material_type` (`image`, `video`,
    /// `voice` or `news`).
    pub async fn get_materials(&self, material_type: &str, offset: u32, count: u32) -> Result<Value> {
        require_argument("material_type", material_type)?;
        self.post_with_token(
            "/cgi-bin/material/batchget_material",
            &json!({ "type": material_type, "offset": offset, "count": count }),
        )
        .await
    }

    /// Temporary QR code carrying an integer scene, valid for `expire_seconds`.
    pub async fn create_scene_qrcode(&self, scene_id: u32, expire_seconds: u32) -> Result<Value> {
        self.post_with_token(
            "/cgi-bin/qrcode/create",
            &json!({
                "expire_seconds": expire_seconds,
                "action_name": "QR_SCENE",
                "action_info": { "scene": { "scene_id": scene_id } }
            }),
        )
        .await
    }

    pub async fn create_limit_scene_qrcode(&self, scene_id: u32) -> Result<Value> {
        self.post_with_token(
            "/cgi-bin/qrcode/create",
            &json!({
                "action_name": "QR_LIMIT_SCENE",
                "action_info": { "scene": { "scene_id": scene_id } }
            }),
        )
        .await
    }

    pub async fn create_limit_str_scene_qrcode(&self, scene_str: &str) -> Result<Value> {
        require_argument("scene_str", scene_str)?;
        self.post_with_token(
            "/cgi-bin/qrcode/create",
            &json!({
                "action_name": "QR_LIMIT_STR_SCENE",
                "action_info": { "scene": { "scene_str": scene_str } }
            }),
        )
        .await
    }
}
