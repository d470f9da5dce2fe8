use crate::config::constants::{FALLBACK_SELECTED_FILES, MAX_QA_FILE_CHARS};
use crate::errors::{ActionError, ActionResult};
use crate::helpers::globs::build_glob_set;
use crate::helpers::text::strip_code_fences;
use crate::prompts::repo_qa_prompt::{build_answer_prompt, build_file_selection_prompt};
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::github::client::GitHubClient;
use crate::structs::github::repo_context::RepoContext;

/// Where the answer gets posted back.
enum QuestionTarget {
    Issue(u64),
    Discussion { node_id: String, number: u64 },
}

pub struct RepoQaAction {
    github: GitHubClient,
    gemini: GeminiProvider,
    ctx: RepoContext,
}

impl RepoQaAction {
    pub fn new(github: GitHubClient, gemini: GeminiProvider, ctx: RepoContext) -> Self {
        Self {
            github,
            gemini,
            ctx,
        }
    }

    pub async fn run(
        &self,
        issue_number: Option<u64>,
        discussion_number: Option<u64>,
        source_paths: &str,
    ) -> ActionResult<()> {
        let owner = &self.ctx.owner;
        let repo = &self.ctx.repo;

        // Issue takes precedence when both are given.
        let (question, target) = if let Some(number) = issue_number {
            let issue = self.github.get_issue(owner, repo, number).await?;
            log::info!("📋 Question from issue #{}: {}", number, issue.title);
            let question = format!("{}\n\n{}", issue.title, issue.body.as_deref().unwrap_or(""));
            (question, QuestionTarget::Issue(number))
        } else if let Some(number) = discussion_number {
            let discussion = self.github.get_discussion(owner, repo, number).await?;
            log::info!("📋 Question from discussion #{}: {}", number, discussion.title);
            let question = format!("{}\n\n{}", discussion.title, discussion.body);
            (
                question,
                QuestionTarget::Discussion {
                    node_id: discussion.node_id,
                    number,
                },
            )
        } else {
            return Err(ActionError::missing_input(
                "issue_number or discussion_number",
                "Provide --issue-number or --discussion-number",
            ));
        };

        let default_branch = self.github.get_default_branch(owner, repo).await?;
        let tree = self
            .github
            .get_repo_tree(owner, repo, &default_branch.sha)
            .await?;

        let globs = build_glob_set(source_paths)?;
        let source_files = tree
            .iter()
            .filter(|entry| entry.is_blob())
            .filter(|entry| globs.is_match(&entry.path))
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>();

        log::info!(
            "📋 Found {} source files matching: {}",
            source_files.len(),
            source_paths
        );

        let selection_prompt = build_file_selection_prompt(&question, &source_files);
        let selection_response = self
            .gemini
            .generate(&selection_prompt)
            .await?;

        let relevant_files: Vec<String> =
            match serde_json::from_str::<Vec<String>>(&strip_code_fences(&selection_response)) {
                Ok(selected) => selected
                    .into_iter()
                    .filter(|path| source_files.contains(path))
                    .collect(),
                Err(_) => {
                    log::warn!("⚠️  Could not parse file selection, using first {} source files", FALLBACK_SELECTED_FILES);
                    source_files
                        .iter()
                        .take(FALLBACK_SELECTED_FILES)
                        .cloned()
                        .collect()
                }
            };

        log::info!("📋 Reading {} relevant files...", relevant_files.len());

        let mut file_contents = Vec::new();
        for path in &relevant_files {
            match self
                .github
                .get_file_content(owner, repo, path, &default_branch.name)
                .await
            {
                Ok(content) => {
                    let capped: String = content.chars().take(MAX_QA_FILE_CHARS).collect();
                    file_contents.push((path.clone(), capped));
                }
                Err(e) => log::debug!("Could not read {}: {}", path, e),
            }
        }

        let answer_prompt = build_answer_prompt(owner, repo, &question, &file_contents);
        let answer = self
            .gemini
            .generate(&answer_prompt)
            .await?;

        let response_body = format!(
            "## Answer\n\n{}\n\n---\n*Based on {} source file(s) - Generated by [gemini-repo-qa](https://github.com/dortort/gemini-actions)*",
            answer,
            file_contents.len(),
        );

        match target {
            QuestionTarget::Issue(number) => {
                self.github.post_comment(owner, repo, number, &response_body).await?;
                log::info!("✅ Answer posted on issue #{}", number);
            }
            QuestionTarget::Discussion { node_id, number } => {
                self.github
                    .add_discussion_comment(&node_id, &response_body)
                    .await?;
                log::info!("✅ Answer posted on discussion #{}", number);
            }
        }

        Ok(())
    }
}
