use serde::Deserialize;

/// One changed file in a pull request, as returned by the GitHub files
/// API. `patch` is absent for binary files and for files GitHub did not
/// compute a diff for.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestFile {
    pub filename: String,
    pub status: String,
    pub additions: u64,
    pub deletions: u64,
    pub patch: Option<String>,
}

impl PullRequestFile {
    #[cfg(test)]
    pub fn with_patch(filename: &str, patch: &str) -> Self {
        Self {
            filename: filename.to_string(),
            status: "modified".to_string(),
            additions: 0,
            deletions: 0,
            patch: Some(patch.to_string()),
        }
    }

    #[cfg(test)]
    pub fn without_patch(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            status: "modified".to_string(),
            additions: 0,
            deletions: 0,
            patch: None,
        }
    }
}
