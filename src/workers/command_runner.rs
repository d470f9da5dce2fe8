use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::{DATADOG_API_KEY_ENV, DATADOG_APP_KEY_ENV, GEMINI_API_KEY_ENV, GITHUB_TOKEN_ENV};
use crate::enums::commands::Commands;
use crate::errors::ActionResult;
use crate::services::actions::datadog_responder::DatadogResponderAction;
use crate::services::actions::dependency_impact::DependencyImpactAction;
use crate::services::actions::pr_from_issue::PrFromIssueAction;
use crate::services::actions::repo_qa::RepoQaAction;
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::datadog::client::DatadogClient;
use crate::services::github::client::GitHubClient;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ActionResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::DependencyImpact { pr_number, model } => {
                self.dependency_impact_command(pr_number, model).await
            }
            Commands::DatadogRespond { query, action, model } => {
                self.datadog_respond_command(query, action, model).await
            }
            Commands::PrFromIssue { issue_number, model } => {
                self.pr_from_issue_command(issue_number, model).await
            }
            Commands::RepoQa { issue_number, discussion_number, source_paths, model } => {
                self.repo_qa_command(issue_number, discussion_number, source_paths, model).await
            }
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn dependency_impact_command(
        &self,
        pr_number: u64,
        model: Option<String>,
    ) -> ActionResult<()> {
        let ctx = ConfigManager::repo_context()?;
        let action = DependencyImpactAction::new(
            Self::github_client()?,
            Self::gemini_provider(model)?,
            ctx,
        );
        action.run(pr_number).await
    }

    async fn datadog_respond_command(
        &self,
        query: String,
        action: crate::enums::alert_action::AlertAction,
        model: Option<String>,
    ) -> ActionResult<()> {
        let ctx = ConfigManager::repo_context()?;
        let datadog = DatadogClient::new(
            ConfigManager::require_env(DATADOG_API_KEY_ENV)?,
            ConfigManager::require_env(DATADOG_APP_KEY_ENV)?,
        )?;
        let responder = DatadogResponderAction::new(
            Self::github_client()?,
            Self::gemini_provider(model)?,
            datadog,
            ctx,
        );
        responder.run(&query, &action).await
    }

    async fn pr_from_issue_command(
        &self,
        issue_number: u64,
        model: Option<String>,
    ) -> ActionResult<()> {
        let ctx = ConfigManager::repo_context()?;
        let action = PrFromIssueAction::new(
            Self::github_client()?,
            Self::gemini_provider(model)?,
            ctx,
        );
        action.run(issue_number).await
    }

    async fn repo_qa_command(
        &self,
        issue_number: Option<u64>,
        discussion_number: Option<u64>,
        source_paths: String,
        model: Option<String>,
    ) -> ActionResult<()> {
        let ctx = ConfigManager::repo_context()?;
        let action = RepoQaAction::new(
            Self::github_client()?,
            Self::gemini_provider(model)?,
            ctx,
        );
        action.run(issue_number, discussion_number, &source_paths).await
    }

    fn github_client() -> ActionResult<GitHubClient> {
        GitHubClient::new(ConfigManager::require_env(GITHUB_TOKEN_ENV)?)
    }

    /// CLI `--model` wins over the config file, which wins over the default.
    fn gemini_provider(model_override: Option<String>) -> ActionResult<GeminiProvider> {
        let config = ConfigManager::load()?;
        let api_key = ConfigManager::require_env(GEMINI_API_KEY_ENV)?;
        let model = model_override.unwrap_or(config.model);

        Ok(GeminiProvider::new(api_key)
            .with_model(model)
            .with_token_budget(config.max_input_tokens))
    }
}
