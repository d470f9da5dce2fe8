use crate::config::constants::FALLBACK_PLAN_FILES;
use crate::errors::{ActionError, ActionResult};
use crate::helpers::text::strip_code_fences;
use crate::prompts::pr_from_issue_prompt::{build_changes_prompt, build_plan_prompt};
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::github::client::GitHubClient;
use crate::structs::file_change::FileChange;
use crate::structs::github::repo_context::RepoContext;

pub struct PrFromIssueAction {
    github: GitHubClient,
    gemini: GeminiProvider,
    ctx: RepoContext,
}

impl PrFromIssueAction {
    pub fn new(github: GitHubClient, gemini: GeminiProvider, ctx: RepoContext) -> Self {
        Self {
            github,
            gemini,
            ctx,
        }
    }

    pub async fn run(&self, issue_number: u64) -> ActionResult<()> {
        let owner = &self.ctx.owner;
        let repo = &self.ctx.repo;

        log::info!("📋 Processing issue #{}...", issue_number);

        let issue = self.github.get_issue(owner, repo, issue_number).await?;
        log::info!("📋 Issue: {}", issue.title);

        let default_branch = self.github.get_default_branch(owner, repo).await?;
        let tree = self
            .github
            .get_repo_tree(owner, repo, &default_branch.sha)
            .await?;
        let file_list = tree
            .iter()
            .filter(|entry| entry.is_blob())
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>();

        let plan_prompt = build_plan_prompt(&issue, &file_list);
        let plan_response = self
            .gemini
            .generate(&plan_prompt)
            .await?;

        let relevant_files: Vec<String> =
            match serde_json::from_str(&strip_code_fences(&plan_response)) {
                Ok(files) => files,
                Err(_) => {
                    log::warn!("⚠️  Could not parse file plan from Gemini, using first {} repository files", FALLBACK_PLAN_FILES);
                    file_list.iter().take(FALLBACK_PLAN_FILES).cloned().collect()
                }
            };

        let mut file_contents = Vec::new();
        for path in &relevant_files {
            if !file_list.contains(path) {
                continue;
            }
            match self
                .github
                .get_file_content(owner, repo, path, &default_branch.name)
                .await
            {
                Ok(content) => file_contents.push((path.clone(), content)),
                Err(e) => log::debug!("Could not read {}, may be a new file: {}", path, e),
            }
        }

        let changes_prompt = build_changes_prompt(&issue, &file_contents);
        let changes_response = self
            .gemini
            .generate(&changes_prompt)
            .await?;

        let changes: Vec<FileChange> =
            serde_json::from_str(&strip_code_fences(&changes_response)).map_err(|_| {
                ActionError::parse_error(
                    "Gemini response",
                    "Failed to parse code changes from Gemini response",
                )
            })?;

        if changes.is_empty() {
            log::info!("✅ Gemini determined no changes are needed");
            return Ok(());
        }

        let branch_name = format!("gemini/issue-{}", issue_number);
        self.github
            .create_branch(owner, repo, &branch_name, &default_branch.sha)
            .await?;
        log::info!("🚀 Created branch: {}", branch_name);

        for change in &changes {
            // New files have no blob sha; lookups on them are skipped.
            let sha = if file_list.contains(&change.path) {
                self.github
                    .get_file_sha(owner, repo, &change.path, &branch_name)
                    .await
                    .unwrap_or(None)
            } else {
                None
            };

            let message = format!("feat: update {} for issue #{}", change.path, issue_number);
            self.github
                .create_or_update_file(
                    owner,
                    repo,
                    &change.path,
                    &change.content,
                    &message,
                    &branch_name,
                    sha.as_deref(),
                )
                .await?;
            log::info!("✅ Updated: {}", change.path);
        }

        let change_list = changes
            .iter()
            .map(|c| format!("- `{}`", c.path))
            .collect::<Vec<_>>()
            .join("\n");
        let pr_body = format!(
            "## Summary\n\nThis PR was automatically generated by Gemini to address #{issue_number}.\n\n### Changes\n{change_list}\n\n### Issue\nCloses #{issue_number}\n\n---\n*Generated by [gemini-pr-from-issue](https://github.com/dortort/gemini-actions)*",
        );

        let pr_number = self
            .github
            .create_pull_request(
                owner,
                repo,
                &format!("feat: {}", issue.title),
                &pr_body,
                &branch_name,
                &default_branch.name,
            )
            .await?;

        log::info!("✅ Created PR #{}", pr_number);

        Ok(())
    }
}
