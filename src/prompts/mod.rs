pub mod datadog_prompt;
pub mod dependency_impact_prompt;
pub mod pr_from_issue_prompt;
pub mod repo_qa_prompt;
