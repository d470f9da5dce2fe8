use chrono::{DateTime, Utc};

/// A recent commit, trimmed to what the alert-correlation prompt needs.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommitInfo {
    pub fn short_sha(&self) -> &str {
        &self.sha[..self.sha.len().min(7)]
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sha_truncates_to_seven_chars() {
        let commit = CommitInfo {
            sha: "0123456789abcdef".to_string(),
            message: "fix: a thing\n\ndetails".to_string(),
            author: None,
            date: None,
        };
        assert_eq!(commit.short_sha(), "0123456");
        assert_eq!(commit.summary(), "fix: a thing");
    }
}
