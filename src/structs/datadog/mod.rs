pub mod metric_result;
pub mod metric_series;
pub mod monitor_result;
