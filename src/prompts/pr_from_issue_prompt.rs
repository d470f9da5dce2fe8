use crate::structs::github::issue_info::IssueInfo;

pub fn build_plan_prompt(issue: &IssueInfo, file_list: &[String]) -> String {
    format!(
        r#"You are a software engineer. A GitHub issue has been filed requesting a change to the repository.

**Issue #{number}: {title}**
{body}

**Repository files:**
{files}

Analyze the issue and determine which files need to be created or modified to address it.
Respond with a JSON array of file paths that are relevant. Only include files that need changes.
If new files need to be created, include them too.

Respond ONLY with a JSON array of strings, e.g.: ["src/config.ts", "README.md"]"#,
        number = issue.number,
        title = issue.title,
        body = issue.body.as_deref().unwrap_or("No description provided."),
        files = file_list.join("\n"),
    )
}

pub fn build_changes_prompt(issue: &IssueInfo, file_contents: &[(String, String)]) -> String {
    let current_files = file_contents
        .iter()
        .map(|(path, content)| format!("--- {} ---\n{}", path, content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a software engineer implementing a change based on a GitHub issue.

**Issue #{number}: {title}**
{body}

**Current file contents:**
{current_files}

Generate the complete updated file contents for each file that needs to change.
If a file needs to be created, provide its full content.

Respond ONLY with a JSON array of objects with "path" and "content" fields:
[{{"path": "src/example.ts", "content": "...full file content..."}}]

Important:
- Provide the COMPLETE file content, not just the diff
- Make minimal changes needed to address the issue
- Follow existing code style and conventions"#,
        number = issue.number,
        title = issue.title,
        body = issue.body.as_deref().unwrap_or("No description provided."),
        current_files = current_files,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_issue() -> IssueInfo {
        IssueInfo {
            number: 42,
            title: "Add retry logic".to_string(),
            body: None,
            labels: Vec::new(),
        }
    }

    #[test]
    fn plan_prompt_substitutes_missing_body() {
        let prompt = build_plan_prompt(&sample_issue(), &["src/main.rs".to_string()]);

        assert!(prompt.contains("**Issue #42: Add retry logic**"));
        assert!(prompt.contains("No description provided."));
        assert!(prompt.contains("src/main.rs"));
    }

    #[test]
    fn changes_prompt_includes_file_contents() {
        let contents = vec![("src/lib.rs".to_string(), "pub fn run() {}".to_string())];

        let prompt = build_changes_prompt(&sample_issue(), &contents);

        assert!(prompt.contains("--- src/lib.rs ---\npub fn run() {}"));
        assert!(prompt.contains("\"path\" and \"content\" fields"));
    }
}
