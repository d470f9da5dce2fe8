use crate::config::constants::{MAX_SCANNED_SOURCE_FILES, MAX_USAGE_LINES_PER_FILE};
use crate::errors::ActionResult;
use crate::services::diff_parser::import_patterns;
use crate::services::github::client::GitHubClient;
use crate::structs::dependency_change::DependencyChange;
use crate::structs::dependency_usage::DependencyUsage;

/// Samples repository source files for usage sites of changed
/// dependencies, so the analysis prompt can reference real code.
pub struct UsageScanner<'a> {
    github: &'a GitHubClient,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> UsageScanner<'a> {
    pub fn new(github: &'a GitHubClient, owner: &'a str, repo: &'a str) -> Self {
        Self {
            github,
            owner,
            repo,
        }
    }

    pub async fn collect_usage(
        &self,
        changes: &[DependencyChange],
        source_files: &[String],
        branch: &str,
    ) -> ActionResult<Vec<DependencyUsage>> {
        let mut usage = Vec::with_capacity(changes.len());

        for change in changes {
            let patterns = import_patterns(&change.name, change.ecosystem.as_str());
            let mut snippets = Vec::new();

            for path in source_files.iter().take(MAX_SCANNED_SOURCE_FILES) {
                let content = match self
                    .github
                    .get_file_content(self.owner, self.repo, path, branch)
                    .await
                {
                    Ok(content) => content,
                    Err(e) => {
                        // Unreadable files (deleted, too large, submodules) are skipped.
                        log::debug!("Skipping {}: {}", path, e);
                        continue;
                    }
                };

                if !patterns.iter().any(|p| content.contains(p.as_str())) {
                    continue;
                }

                let relevant = matching_lines(&content, &patterns, &change.name);
                if !relevant.is_empty() {
                    snippets.push(format!("**{}:**\n{}", path, relevant.join("\n")));
                }
            }

            usage.push(DependencyUsage {
                name: change.name.clone(),
                snippets,
            });
        }

        Ok(usage)
    }
}

/// Lines mentioning an import pattern or the dependency name itself,
/// capped so a single file cannot dominate the prompt.
fn matching_lines(content: &str, patterns: &[String], dep_name: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| {
            patterns.iter().any(|p| line.contains(p.as_str())) || line.contains(dep_name)
        })
        .take(MAX_USAGE_LINES_PER_FILE)
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_lines_finds_imports_and_name_mentions() {
        let content = [
            "import axios from \"axios\";",
            "const x = 1;",
            "axios.get(url);",
        ]
        .join("\n");
        let patterns = import_patterns("axios", "npm");

        let lines = matching_lines(&content, &patterns, "axios");

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("from \"axios\""));
        assert!(lines[1].contains("axios.get"));
    }

    #[test]
    fn matching_lines_caps_per_file_output() {
        let content = vec!["axios.get(url);"; 50].join("\n");
        let patterns = import_patterns("axios", "npm");

        let lines = matching_lines(&content, &patterns, "axios");

        assert_eq!(lines.len(), MAX_USAGE_LINES_PER_FILE);
    }
}
