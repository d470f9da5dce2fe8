/// Truncate text to a character budget, appending a notice when truncated.
pub fn truncate_text(text: &str, max_chars: usize, label: &str) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!(
        "{}\n\n... [{} truncated: {} characters omitted]",
        truncated,
        label,
        total - max_chars
    )
}

/// Strip a surrounding markdown code fence (``` or ```json) from a model
/// reply so the remainder can be fed to a JSON parser.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.remove(0);
    if lines.last().map(|l| l.trim() == "```").unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_text("hello", 10, "content"), "hello");
    }

    #[test]
    fn long_text_gets_truncation_notice() {
        let result = truncate_text("abcdefghij", 4, "diff");
        assert!(result.starts_with("abcd\n"));
        assert!(result.contains("[diff truncated: 6 characters omitted]"));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let result = truncate_text("ééééé", 3, "content");
        assert!(result.starts_with("ééé\n"));
        assert!(result.contains("2 characters omitted"));
    }

    #[test]
    fn strips_json_fence() {
        let reply = "```json\n[\"a.rs\", \"b.rs\"]\n```";
        assert_eq!(strip_code_fences(reply), "[\"a.rs\", \"b.rs\"]");
    }

    #[test]
    fn strips_bare_fence() {
        let reply = "```\n{\"x\": 1}\n```";
        assert_eq!(strip_code_fences(reply), "{\"x\": 1}");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("  [1, 2]  "), "[1, 2]");
    }
}
