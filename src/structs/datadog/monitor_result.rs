use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorResult {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub overall_state: String,
    pub message: String,
    pub query: String,
}
