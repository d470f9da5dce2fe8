pub mod datadog_responder;
pub mod dependency_impact;
pub mod pr_from_issue;
pub mod repo_qa;
