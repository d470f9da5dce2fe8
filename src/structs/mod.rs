pub mod cli;
pub mod dependency_change;
pub mod dependency_usage;
pub mod file_change;
pub mod config;
pub mod github;
pub mod datadog;
pub mod ai;
