use crate::core::api::WeChatApi;
use crate::core::xml::{self, XmlValue};
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use std::collections::HashMap;

impl<C: SettingsProvider> WeChatApi<C> {
    /// Places a unified payment order.
    ///
    /// `order` is sent as-is; it must already carry `appid`, `mch_id`,
    /// `nonce_str` and `sign`. The reply is flattened to its CDATA fields,
    /// so callers inspect `return_code`/`result_code` themselves.
    pub async fn get_unifiedorder(&self, order: &XmlValue) -> Result<HashMap<String, String>> {
        let url = self.pay_url("/pay/unifiedorder");
        let body = xml::encode_bytes(order);
        tracing::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .http()
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        let bytes = response.bytes().await?;
        let fields = xml::decode(&String::from_utf8_lossy(&bytes));
        if fields.get("return_code").map(String::as_str) != Some("SUCCESS") {
            tracing::warn!(
                "Unified order not accepted: {}",
                fields.get("return_msg").map(String::as_str).unwrap_or("no return_msg")
            );
        }
        Ok(fields)
    }
}
