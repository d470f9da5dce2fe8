use crate::enums::alert_action::AlertAction;
use crate::structs::github::commit_info::CommitInfo;

pub fn build_alert_prompt(
    data_label: &str,
    data_json: &str,
    commits: &[CommitInfo],
    owner: &str,
    repo: &str,
    action: &AlertAction,
) -> String {
    let commit_lines = commits
        .iter()
        .map(|c| {
            format!(
                "- {} ({}): {} by {}",
                c.short_sha(),
                c.date
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_else(|| "unknown date".to_string()),
                c.summary(),
                c.author.as_deref().unwrap_or("unknown"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let response_surface = match action {
        AlertAction::OpenIssue => "issue body",
        _ => "comment",
    };

    format!(
        r#"You are a site reliability engineer analyzing monitoring data from Datadog in the context of a GitHub repository.

**Datadog {data_label} Data:**
```json
{data_json}
```

**Recent Commits (last 10):**
{commit_lines}

**Repository:** {owner}/{repo}

Analyze the monitoring data and provide:
1. **Status Summary**: What is the current state? Is there an active incident or anomaly?
2. **Correlation**: Do any recent commits correlate with the observed behavior? Which ones and why?
3. **Severity Assessment**: How severe is this? (Critical / High / Medium / Low / Informational)
4. **Recommended Action**: What should be done next?

Format your response as structured markdown suitable for a GitHub {response_surface}."#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_targets_issue_body_for_open_issue() {
        let prompt = build_alert_prompt(
            "Monitor",
            "{}",
            &[],
            "dortort",
            "gemini-actions",
            &AlertAction::OpenIssue,
        );

        assert!(prompt.contains("**Datadog Monitor Data:**"));
        assert!(prompt.contains("suitable for a GitHub issue body."));
        assert!(prompt.contains("**Repository:** dortort/gemini-actions"));
    }

    #[test]
    fn prompt_targets_comment_for_other_actions() {
        let prompt = build_alert_prompt(
            "Metrics",
            "{}",
            &[],
            "dortort",
            "gemini-actions",
            &AlertAction::CommentOnPr,
        );

        assert!(prompt.contains("suitable for a GitHub comment."));
    }
}
