use crate::config::constants::MAX_SELECTED_FILES;

pub fn build_file_selection_prompt(question: &str, source_files: &[String]) -> String {
    format!(
        r#"A user asked a question about a codebase. Which files are most likely relevant to answering it?

**Question:** {question}

**Available files:**
{files}

Return a JSON array of the most relevant file paths (max {max} files). Consider the question topic and select files that would contain the answer.
Respond ONLY with a JSON array of strings."#,
        question = question,
        files = source_files.join("\n"),
        max = MAX_SELECTED_FILES,
    )
}

pub fn build_answer_prompt(
    owner: &str,
    repo: &str,
    question: &str,
    file_contents: &[(String, String)],
) -> String {
    let sources = file_contents
        .iter()
        .map(|(path, content)| format!("### {}\n```\n{}\n```", path, content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a knowledgeable assistant for the {owner}/{repo} repository. A user has asked a question, and you have access to relevant source files. Answer the question with specific references to the code.

**Question:** {question}

**Source Files:**
{sources}

Guidelines:
- Reference specific files and line numbers when explaining concepts
- Use code snippets from the actual source to illustrate your points
- If the source files don't contain enough information to fully answer the question, say so
- Structure your answer clearly with headers if needed
- Be concise but thorough"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_prompt_lists_candidate_files() {
        let files = vec!["src/main.rs".to_string(), "src/lib.rs".to_string()];

        let prompt = build_file_selection_prompt("How does startup work?", &files);

        assert!(prompt.contains("**Question:** How does startup work?"));
        assert!(prompt.contains("src/main.rs\nsrc/lib.rs"));
        assert!(prompt.contains("max 20 files"));
    }

    #[test]
    fn answer_prompt_fences_each_source_file() {
        let contents = vec![("src/lib.rs".to_string(), "pub fn run() {}".to_string())];

        let prompt = build_answer_prompt("dortort", "gemini-actions", "What does run do?", &contents);

        assert!(prompt.contains("for the dortort/gemini-actions repository"));
        assert!(prompt.contains("### src/lib.rs\n```\npub fn run() {}\n```"));
    }
}
