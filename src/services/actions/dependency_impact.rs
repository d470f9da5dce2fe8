use crate::config::constants::SOURCE_FILE_EXTENSIONS;
use crate::errors::ActionResult;
use crate::prompts::dependency_impact_prompt::build_analysis_prompt;
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::diff_parser::parse_dependency_changes;
use crate::services::github::client::GitHubClient;
use crate::services::usage_scanner::UsageScanner;
use crate::structs::github::repo_context::RepoContext;

pub struct DependencyImpactAction {
    github: GitHubClient,
    gemini: GeminiProvider,
    ctx: RepoContext,
}

impl DependencyImpactAction {
    pub fn new(github: GitHubClient, gemini: GeminiProvider, ctx: RepoContext) -> Self {
        Self {
            github,
            gemini,
            ctx,
        }
    }

    pub async fn run(&self, pr_number: u64) -> ActionResult<()> {
        let owner = &self.ctx.owner;
        let repo = &self.ctx.repo;

        log::info!("📋 Analyzing dependency impact for PR #{}...", pr_number);

        let pr = self.github.get_pull_request(owner, repo, pr_number).await?;
        log::info!("📋 PR: {}", pr.title);

        let changes = parse_dependency_changes(&pr.files);

        if changes.is_empty() {
            log::info!("✅ No dependency version changes detected in this PR");
            self.github
                .post_comment(
                    owner,
                    repo,
                    pr_number,
                    "## Gemini Dependency Impact Analysis\n\nNo dependency version changes detected in this PR.",
                )
                .await?;
            return Ok(());
        }

        let names = changes
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        log::info!("🚀 Found {} dependency change(s): {}", changes.len(), names);

        let default_branch = self.github.get_default_branch(owner, repo).await?;
        let tree = self
            .github
            .get_repo_tree(owner, repo, &default_branch.sha)
            .await?;
        let source_files = tree
            .iter()
            .filter(|entry| entry.is_blob())
            .filter(|entry| is_source_file(&entry.path))
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>();

        let scanner = UsageScanner::new(&self.github, owner, repo);
        let usage = scanner
            .collect_usage(&changes, &source_files, &default_branch.name)
            .await?;

        let prompt = build_analysis_prompt(&changes, &usage, &pr.diff);
        let analysis = self
            .gemini
            .generate(&prompt)
            .await?;

        let usage_sites: usize = usage.iter().map(|u| u.snippets.len()).sum();
        let comment = format!(
            "## Gemini Dependency Impact Analysis\n\n{}\n\n---\n*Analyzed {} dependency change(s) across {} usage site(s) - Generated by [gemini-dependency-impact](https://github.com/dortort/gemini-actions)*",
            analysis,
            changes.len(),
            usage_sites,
        );

        self.github.post_comment(owner, repo, pr_number, &comment).await?;
        log::info!("✅ Dependency impact analysis posted");

        Ok(())
    }
}

fn is_source_file(path: &str) -> bool {
    if path.contains("node_modules") {
        return false;
    }
    match path.rsplit_once('.') {
        Some((_, ext)) => SOURCE_FILE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_filter_accepts_known_extensions() {
        assert!(is_source_file("src/index.ts"));
        assert!(is_source_file("cmd/main.go"));
        assert!(is_source_file("lib/worker.rb"));
    }

    #[test]
    fn source_file_filter_rejects_other_paths() {
        assert!(!is_source_file("README.md"));
        assert!(!is_source_file("Makefile"));
        assert!(!is_source_file("node_modules/axios/index.js"));
    }
}
