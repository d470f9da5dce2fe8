use crate::config::constants::{MAX_DIFF_CHARS, MAX_USAGE_CHARS_PER_DEP};
use crate::helpers::text::truncate_text;
use crate::structs::dependency_change::DependencyChange;
use crate::structs::dependency_usage::DependencyUsage;

pub fn build_analysis_prompt(
    changes: &[DependencyChange],
    usage: &[DependencyUsage],
    diff: &str,
) -> String {
    let change_lines = changes
        .iter()
        .map(|c| {
            format!(
                "- **{}**: {} -> {} ({})",
                c.name, c.from_version, c.to_version, c.ecosystem
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let usage_sections = usage
        .iter()
        .map(|u| {
            if u.snippets.is_empty() {
                format!("### {}\nNo direct imports found in source files.", u.name)
            } else {
                let joined = u.snippets.join("\n\n");
                format!(
                    "### {}\n{}",
                    u.name,
                    truncate_text(&joined, MAX_USAGE_CHARS_PER_DEP, &format!("{} usage", u.name))
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a dependency upgrade analyst. A pull request updates the following dependencies.
For each dependency, analyze the impact on the codebase.

**Dependency Changes:**
{change_lines}

**Usage in Codebase:**
{usage_sections}

**PR Diff:**
```diff
{diff}
```

For each dependency, provide:
1. **Breaking changes**: Known breaking changes between these versions that affect this codebase
2. **Affected files**: Which files in the codebase use APIs that changed
3. **Migration steps**: Specific steps needed to adapt the codebase (if any)
4. **Risk assessment**: Low / Medium / High risk based on actual usage

Format your response as a markdown report. Be specific and reference actual file paths and API usage from the codebase.
If you don't have enough information about a dependency's changelog, say so and recommend reviewing the release notes manually."#,
        change_lines = change_lines,
        usage_sections = usage_sections,
        diff = truncate_text(diff, MAX_DIFF_CHARS, "PR diff"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ecosystem::Ecosystem;

    #[test]
    fn prompt_lists_changes_and_usage() {
        let changes = vec![DependencyChange {
            name: "axios".to_string(),
            from_version: "1.5.0".to_string(),
            to_version: "1.6.0".to_string(),
            ecosystem: Ecosystem::Npm,
        }];
        let usage = vec![DependencyUsage {
            name: "axios".to_string(),
            snippets: vec!["**src/api.ts:**\nimport axios from \"axios\";".to_string()],
        }];

        let prompt = build_analysis_prompt(&changes, &usage, "-  \"axios\": \"1.5.0\"");

        assert!(prompt.contains("- **axios**: 1.5.0 -> 1.6.0 (npm)"));
        assert!(prompt.contains("**src/api.ts:**"));
        assert!(prompt.contains("Risk assessment"));
    }

    #[test]
    fn prompt_notes_missing_usage() {
        let changes = vec![DependencyChange {
            name: "left-pad".to_string(),
            from_version: "1.0.0".to_string(),
            to_version: "2.0.0".to_string(),
            ecosystem: Ecosystem::Npm,
        }];
        let usage = vec![DependencyUsage {
            name: "left-pad".to_string(),
            snippets: Vec::new(),
        }];

        let prompt = build_analysis_prompt(&changes, &usage, "");

        assert!(prompt.contains("### left-pad\nNo direct imports found in source files."));
    }
}
