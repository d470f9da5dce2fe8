use serde::Deserialize;

/// A full-file replacement produced by Gemini for pr-from-issue.
#[derive(Debug, Clone, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub content: String,
}
