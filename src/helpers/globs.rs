use globset::{Glob, GlobSet, GlobSetBuilder};
use crate::errors::{ActionError, ActionResult};

/// Compile a comma-separated list of glob patterns (e.g. "src/**,docs/*.md").
pub fn build_glob_set(patterns: &str) -> ActionResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let glob = Glob::new(pattern).map_err(|e| {
            ActionError::config_error(
                &format!("invalid glob pattern '{}': {}", pattern, e),
                Some("Use patterns like src/** or *.rs, separated by commas"),
            )
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ActionError::config_error(&format!("failed to build glob set: {}", e), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_recursive_pattern() {
        let set = build_glob_set("src/**").unwrap();
        assert!(set.is_match("src/main.rs"));
        assert!(set.is_match("src/services/github/mod.rs"));
        assert!(!set.is_match("docs/readme.md"));
    }

    #[test]
    fn matches_any_of_multiple_patterns() {
        let set = build_glob_set("src/**, docs/*.md").unwrap();
        assert!(set.is_match("src/lib.rs"));
        assert!(set.is_match("docs/guide.md"));
        assert!(!set.is_match("docs/nested/guide.md"));
    }

    #[test]
    fn rejects_invalid_pattern() {
        assert!(build_glob_set("src/[").is_err());
    }
}
