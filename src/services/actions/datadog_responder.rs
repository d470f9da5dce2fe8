use crate::config::constants::{MAX_DATADOG_PAYLOAD_CHARS, RECENT_COMMITS_LIMIT};
use crate::enums::alert_action::AlertAction;
use crate::errors::{ActionError, ActionResult};
use crate::helpers::text::truncate_text;
use crate::prompts::datadog_prompt::build_alert_prompt;
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::datadog::client::DatadogClient;
use crate::services::github::client::GitHubClient;
use crate::structs::github::repo_context::RepoContext;

pub struct DatadogResponderAction {
    github: GitHubClient,
    gemini: GeminiProvider,
    datadog: DatadogClient,
    ctx: RepoContext,
}

impl DatadogResponderAction {
    pub fn new(
        github: GitHubClient,
        gemini: GeminiProvider,
        datadog: DatadogClient,
        ctx: RepoContext,
    ) -> Self {
        Self {
            github,
            gemini,
            datadog,
            ctx,
        }
    }

    pub async fn run(&self, query: &str, action: &AlertAction) -> ActionResult<()> {
        let owner = &self.ctx.owner;
        let repo = &self.ctx.repo;

        log::info!("📋 Querying Datadog: {}", query);

        let is_monitor = DatadogClient::is_monitor_id(query);
        let (data_label, data_json) = if is_monitor {
            let monitor = self.datadog.get_monitor(query.trim()).await?;
            log::info!("🚦 Monitor \"{}\" state: {}", monitor.name, monitor.overall_state);
            ("Monitor", serde_json::to_string_pretty(&monitor)?)
        } else {
            let metrics = self.datadog.query_metrics(query).await?;
            log::info!("🚦 Metrics query returned {} series", metrics.series.len());
            ("Metrics", serde_json::to_string_pretty(&metrics)?)
        };
        let data_json = truncate_text(&data_json, MAX_DATADOG_PAYLOAD_CHARS, "Datadog data");

        let commits = self
            .github
            .list_recent_commits(owner, repo, RECENT_COMMITS_LIMIT)
            .await?;

        let prompt = build_alert_prompt(data_label, &data_json, &commits, owner, repo, action);
        let analysis = self
            .gemini
            .generate(&prompt)
            .await?;

        let body = format!(
            "## Datadog Alert Analysis\n\n{}\n\n---\n*Generated by [gemini-datadog-responder](https://github.com/dortort/gemini-actions)*",
            analysis,
        );

        match action {
            AlertAction::OpenIssue => {
                let title = if is_monitor {
                    format!("[Datadog Alert] Monitor {}", query)
                } else {
                    "[Datadog Alert] Metrics anomaly detected".to_string()
                };
                let issue_number = self
                    .github
                    .create_issue(owner, repo, &title, &body, &["datadog", "automated"])
                    .await?;
                log::info!("✅ Created issue #{}", issue_number);
            }
            AlertAction::CommentOnPr => {
                let pr_number = self
                    .github
                    .latest_open_pull_request(owner, repo)
                    .await?
                    .ok_or_else(|| {
                        ActionError::github_error(
                            "comment on pull request",
                            None,
                            "No open pull requests found to comment on",
                        )
                    })?;
                self.github.post_comment(owner, repo, pr_number, &body).await?;
                log::info!("✅ Commented on PR #{}", pr_number);
            }
            AlertAction::TriggerWorkflow => {
                let payload = serde_json::json!({
                    "query": query,
                    "analysis": analysis,
                    "is_monitor": is_monitor,
                });
                self.github
                    .create_dispatch_event(owner, repo, "datadog-alert", payload)
                    .await?;
                log::info!("✅ Triggered repository_dispatch event: datadog-alert");
            }
        }

        Ok(())
    }
}
