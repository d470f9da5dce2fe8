use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: String,
    /// `[timestamp_ms, value]` pairs; the value can be null for gaps.
    pub pointlist: Vec<(f64, Option<f64>)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_set: Option<Vec<String>>,
}
