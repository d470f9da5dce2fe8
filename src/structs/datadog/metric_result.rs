use serde::{Deserialize, Serialize};
use crate::structs::datadog::metric_series::MetricSeries;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
    pub status: String,
    pub query: String,
    #[serde(default)]
    pub series: Vec<MetricSeries>,
}
