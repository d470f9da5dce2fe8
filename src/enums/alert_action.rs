use std::fmt;
use clap::ValueEnum;

/// What to do with the Gemini interpretation of Datadog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlertAction {
    OpenIssue,
    CommentOnPr,
    TriggerWorkflow,
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertAction::OpenIssue => "open_issue",
            AlertAction::CommentOnPr => "comment_on_pr",
            AlertAction::TriggerWorkflow => "trigger_workflow",
        };
        write!(f, "{}", name)
    }
}
