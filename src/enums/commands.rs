use clap::Subcommand;
use crate::config::constants::DEFAULT_SOURCE_PATHS;
use crate::enums::alert_action::AlertAction;

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the impact of dependency version changes in a pull request
    DependencyImpact {
        #[clap(short, long)]
        pr_number: u64,
        #[clap(short, long)]
        model: Option<String>,
    },
    /// Interpret Datadog monitoring data and act on it
    DatadogRespond {
        /// Monitor id (digits only) or a metrics query
        #[clap(short, long)]
        query: String,
        #[clap(short, long, value_enum)]
        action: AlertAction,
        #[clap(short, long)]
        model: Option<String>,
    },
    /// Draft a pull request that addresses a GitHub issue
    PrFromIssue {
        #[clap(short, long)]
        issue_number: u64,
        #[clap(short, long)]
        model: Option<String>,
    },
    /// Answer a repository question asked in an issue or discussion
    RepoQa {
        #[clap(short, long)]
        issue_number: Option<u64>,
        #[clap(short, long)]
        discussion_number: Option<u64>,
        /// Comma-separated glob patterns selecting the source files to consider
        #[clap(short, long, default_value = DEFAULT_SOURCE_PATHS)]
        source_paths: String,
        #[clap(short, long)]
        model: Option<String>,
    },
}
