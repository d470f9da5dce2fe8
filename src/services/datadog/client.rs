use chrono::{Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::config::constants::{DATADOG_API_BASE, USER_AGENT};
use crate::errors::{ActionError, ActionResult};
use crate::structs::datadog::metric_result::MetricResult;
use crate::structs::datadog::monitor_result::MonitorResult;

/// Datadog v1 API client for monitor state and metrics queries.
#[derive(Clone)]
pub struct DatadogClient {
    http: Client,
    base_api: String,
    api_key: String,
    app_key: String,
}

impl DatadogClient {
    pub fn new(api_key: String, app_key: String) -> ActionResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ActionError::system_error("HTTP client setup", &e.to_string()))?;

        Ok(Self {
            http,
            base_api: DATADOG_API_BASE.to_string(),
            api_key,
            app_key,
        })
    }

    /// A query consisting solely of digits is a monitor id rather than a
    /// metrics query.
    pub fn is_monitor_id(query: &str) -> bool {
        let trimmed = query.trim();
        !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        operation: &str,
    ) -> ActionResult<T> {
        let url = format!("{}{}", self.base_api, endpoint);
        let response = self
            .http
            .get(&url)
            .header("DD-API-KEY", &self.api_key)
            .header("DD-APPLICATION-KEY", &self.app_key)
            .header("Content-Type", "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ActionError::datadog_error(
                operation,
                &format!("HTTP {}: {}", status, body),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            ActionError::datadog_error(operation, &format!("failed to parse response: {}", e))
        })
    }

    /// Run a metrics query over the trailing hour.
    pub async fn query_metrics(&self, query: &str) -> ActionResult<MetricResult> {
        let now = Utc::now();
        let one_hour_ago = now - Duration::hours(1);

        self.request(
            "/api/v1/query",
            &[
                ("from", one_hour_ago.timestamp().to_string()),
                ("to", now.timestamp().to_string()),
                ("query", query.to_string()),
            ],
            "query metrics",
        )
        .await
    }

    pub async fn get_monitor(&self, monitor_id: &str) -> ActionResult<MonitorResult> {
        self.request(
            &format!("/api/v1/monitor/{}", monitor_id.trim()),
            &[],
            "get monitor",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_only_queries_are_monitor_ids() {
        assert!(DatadogClient::is_monitor_id("12345"));
        assert!(DatadogClient::is_monitor_id("  42  "));
    }

    #[test]
    fn metric_queries_are_not_monitor_ids() {
        assert!(!DatadogClient::is_monitor_id("avg:system.cpu.user{*}"));
        assert!(!DatadogClient::is_monitor_id("123abc"));
        assert!(!DatadogClient::is_monitor_id(""));
    }
}
