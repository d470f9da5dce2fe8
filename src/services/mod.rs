pub mod actions;
pub mod ai_providers;
pub mod datadog;
pub mod diff_parser;
pub mod github;
pub mod rate_limiter;
pub mod usage_scanner;
