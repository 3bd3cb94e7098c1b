//! Data cube statistics: user growth, article reach and sharing.
//!
//! Every endpoint takes an inclusive `YYYY-MM-DD` date range. WeChat caps
//! the span per endpoint (7 days for user stats, 1 day for hourly data)
//! and answers with an errcode when it is exceeded.

use crate::core::api::WeChatApi;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::validation::require_argument;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct DatacubeRequest<'a> {
    pub begin_date: &'a str,
    pub end_date: &'a str,
}

impl<C: SettingsProvider> WeChatApi<C> {
    async fn datacube(&self, path: &str, begin_date: &str, end_date: &str) -> Result<Value> {
        require_argument("begin_date", begin_date)?;
        require_argument("end_date", end_date)?;
        tracing::debug!("Fetching {} from {} to {}", path, begin_date, end_date);

        self.post_with_token(path, &DatacubeRequest { begin_date, end_date })
            .await
    }

    /// New and cancelled subscriptions per day.
    ///
    /// Endpoint: `/datacube/getusersummary`
    pub async fn get_variation_number_of_user(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getusersummary", begin_date, end_date)
            .await
    }

    /// Total subscribers per day.
    ///
    /// Endpoint: `/datacube/getusercumulate`
    pub async fn get_user_cumulate(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getusercumulate", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getarticlesummary`
    pub async fn get_article_summary(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getarticlesummary", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getarticletotal`
    pub async fn get_article_total(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getarticletotal", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getuserread`
    pub async fn get_user_read(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getuserread", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getuserreadhour`
    pub async fn get_user_read_hour(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getuserreadhour", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getusershare`
    pub async fn get_user_share(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getusershare", begin_date, end_date)
            .await
    }

    /// Endpoint: `/datacube/getusersharehour`
    pub async fn get_user_share_hour(&self, begin_date: &str, end_date: &str) -> Result<Value> {
        self.datacube("/datacube/getusersharehour", begin_date, end_date)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_date_range() {
        let body = serde_json::to_value(DatacubeRequest {
            begin_date: "2024-01-01",
            end_date: "2024-01-07",
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"begin_date": "2024-01-01", "end_date": "2024-01-07"})
        );
    }
}
