use crate::enums::ecosystem::Ecosystem;
use crate::structs::dependency_change::DependencyChange;
use crate::structs::github::pull_request_file::PullRequestFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffSign {
    Removed,
    Added,
}

struct LineMatch<'a> {
    sign: DiffSign,
    name: &'a str,
    version: &'a str,
}

/// Insertion-ordered name -> version map. Re-setting a name overwrites
/// its version but keeps its original position, which is what gives the
/// extractor its deterministic output order.
#[derive(Default)]
struct VersionMap {
    entries: Vec<(String, String)>,
}

impl VersionMap {
    fn set(&mut self, name: &str, version: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = version.to_string();
        } else {
            self.entries.push((name.to_string(), version.to_string()));
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extract dependency version bumps from the per-file patches of a pull
/// request. A change is emitted only when a removed-line version and an
/// added-line version exist for the same dependency name within the same
/// file and the two version strings differ; pure additions and removals
/// are skipped. Files without a patch contribute nothing.
///
/// The four filename rules are independent checks, not an exclusive
/// dispatch; a filename satisfying two rules would be parsed by both.
pub fn parse_dependency_changes(files: &[PullRequestFile]) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for file in files {
        let patch = match file.patch.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => continue,
        };

        if file.filename.ends_with("package.json") || file.filename.ends_with("package-lock.json")
        {
            collect_pairwise(patch, Ecosystem::Npm, match_npm_line, &mut changes);
        }

        if file.filename.ends_with("requirements.txt") || file.filename.ends_with("Pipfile") {
            collect_pairwise(patch, Ecosystem::Pip, match_pip_line, &mut changes);
        }

        if file.filename == "go.mod" {
            collect_pairwise(patch, Ecosystem::Go, match_go_line, &mut changes);
        }

        if file.filename.ends_with(".terraform.lock.hcl") {
            collect_terraform(patch, &mut changes);
        }
    }

    changes
}

/// Literal substrings that indicate usage of a dependency in a source
/// file. Unknown ecosystems fall back to the bare dependency name, so
/// the result is never empty.
pub fn import_patterns(name: &str, ecosystem: &str) -> Vec<String> {
    match ecosystem {
        "npm" => vec![
            format!("from \"{}\"", name),
            format!("from '{}'", name),
            format!("require(\"{}\")", name),
            format!("require('{}')", name),
            format!("from \"{}/", name),
            format!("from '{}/", name),
        ],
        "pip" => vec![format!("import {}", name), format!("from {}", name)],
        "go" => vec![format!("\"{}\"", name), format!("\"{}/", name)],
        "terraform" => {
            // Short provider name from the registry path,
            // e.g. "registry.terraform.io/hashicorp/aws" -> "aws"
            let short = match name.rsplit('/').next() {
                Some(s) if !s.is_empty() => s,
                _ => name,
            };
            vec![
                format!("resource \"{}_", short),
                format!("data \"{}_", short),
                format!("provider \"{}\"", short),
            ]
        }
        _ => vec![name.to_string()],
    }
}

fn collect_pairwise(
    patch: &str,
    ecosystem: Ecosystem,
    matcher: fn(&str) -> Option<LineMatch<'_>>,
    out: &mut Vec<DependencyChange>,
) {
    let mut removed = VersionMap::default();
    let mut added = VersionMap::default();

    for line in patch.split('\n') {
        if let Some(m) = matcher(line) {
            match m.sign {
                DiffSign::Removed => removed.set(m.name, m.version),
                DiffSign::Added => added.set(m.name, m.version),
            }
        }
    }

    emit_changes(&added, &removed, ecosystem, out);
}

/// Terraform lock files put the provider name and its pinned version on
/// separate lines, so the scan carries the most recently seen provider
/// header as fold state. The header is tracked regardless of its diff
/// marker (context, added or removed) so a following version line
/// attaches to the correct provider.
fn collect_terraform(patch: &str, out: &mut Vec<DependencyChange>) {
    let mut current_provider: Option<String> = None;
    let mut removed = VersionMap::default();
    let mut added = VersionMap::default();

    for line in patch.split('\n') {
        if let Some(name) = match_provider_header(line) {
            current_provider = Some(name.to_string());
        }

        if let Some((sign, version)) = match_terraform_version(line) {
            if let Some(provider) = current_provider.as_deref() {
                match sign {
                    DiffSign::Removed => removed.set(provider, version),
                    DiffSign::Added => added.set(provider, version),
                }
            }
        }
    }

    emit_changes(&added, &removed, Ecosystem::Terraform, out);
}

fn emit_changes(
    added: &VersionMap,
    removed: &VersionMap,
    ecosystem: Ecosystem,
    out: &mut Vec<DependencyChange>,
) {
    for (name, to_version) in &added.entries {
        if let Some(from_version) = removed.get(name) {
            if from_version != to_version {
                out.push(DependencyChange {
                    name: name.clone(),
                    from_version: from_version.to_string(),
                    to_version: to_version.clone(),
                    ecosystem,
                });
            }
        }
    }
}

fn split_sign(line: &str) -> Option<(DiffSign, &str)> {
    if let Some(rest) = line.strip_prefix('-') {
        Some((DiffSign::Removed, rest))
    } else if let Some(rest) = line.strip_prefix('+') {
        Some((DiffSign::Added, rest))
    } else {
        None
    }
}

fn skip_blanks(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

fn starts_with_digit(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
}

/// `[-+]  "name": "~1.2.3"`: quoted key, quoted value beginning with an
/// optional `~`/`^` range prefix and a digit. The captured version
/// excludes the range prefix.
fn match_npm_line(line: &str) -> Option<LineMatch<'_>> {
    let (sign, rest) = split_sign(line)?;
    let rest = skip_blanks(rest).strip_prefix('"')?;
    let name_end = rest.find('"')?;
    let name = &rest[..name_end];
    if name.is_empty() {
        return None;
    }
    let rest = rest[name_end + 1..].strip_prefix(':')?;
    let rest = skip_blanks(rest).strip_prefix('"')?;
    let value_end = rest.find('"')?;
    let value = &rest[..value_end];
    let version = value.strip_prefix(['~', '^']).unwrap_or(value);
    if !starts_with_digit(version) {
        return None;
    }
    Some(LineMatch { sign, name, version })
}

/// `[-+]name==1.2.3`: identifier, one or more of `=<>~!`, then a digit
/// and the rest of the non-whitespace version token.
fn match_pip_line(line: &str) -> Option<LineMatch<'_>> {
    let (sign, rest) = split_sign(line)?;

    let name_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    if name_end == 0 {
        return None;
    }
    let name = &rest[..name_end];
    let rest = &rest[name_end..];

    let op_end = rest
        .find(|c: char| !matches!(c, '=' | '<' | '>' | '~' | '!'))
        .unwrap_or(rest.len());
    if op_end == 0 {
        return None;
    }
    let rest = &rest[op_end..];

    if !starts_with_digit(rest) {
        return None;
    }
    let version_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(LineMatch {
        sign,
        name,
        version: &rest[..version_end],
    })
}

/// `[-+]	module/path v1.2.3`: non-whitespace module path, whitespace,
/// `v`, then the version starting with a digit. The leading `v` is not
/// part of the captured version.
fn match_go_line(line: &str) -> Option<LineMatch<'_>> {
    let (sign, rest) = split_sign(line)?;
    let rest = skip_blanks(rest);

    let path_end = rest.find(char::is_whitespace)?;
    let name = &rest[..path_end];
    if name.is_empty() {
        return None;
    }

    let rest = rest[path_end..].trim_start().strip_prefix('v')?;
    if !starts_with_digit(rest) {
        return None;
    }
    let version_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(LineMatch {
        sign,
        name,
        version: &rest[..version_end],
    })
}

/// `provider "registry.terraform.io/hashicorp/aws" {` with a leading
/// context, added or removed diff marker.
fn match_provider_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix([' ', '+', '-'])?;
    let rest = skip_blanks(rest).strip_prefix("provider")?;

    let after_ws = skip_blanks(rest);
    if after_ws.len() == rest.len() {
        // A whitespace separator is required between the keyword and the name.
        return None;
    }

    let rest = after_ws.strip_prefix('"')?;
    let name_end = rest.find('"')?;
    let name = &rest[..name_end];
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// `[-+]  version = "5.31.0"`: the pinned version under the current
/// provider block.
fn match_terraform_version(line: &str) -> Option<(DiffSign, &str)> {
    let (sign, rest) = split_sign(line)?;
    let rest = skip_blanks(rest).strip_prefix("version")?;
    let rest = skip_blanks(rest).strip_prefix('=')?;
    let rest = skip_blanks(rest).strip_prefix('"')?;
    let version_end = rest.find('"')?;
    let version = &rest[..version_end];
    if !starts_with_digit(version) || version.contains(char::is_whitespace) {
        return None;
    }
    Some((sign, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(filename: &str, patch: &str) -> Vec<DependencyChange> {
        parse_dependency_changes(&[PullRequestFile::with_patch(filename, patch)])
    }

    #[test]
    fn terraform_detects_single_provider_version_change() {
        let patch = [
            r#" provider "registry.terraform.io/hashicorp/aws" {"#,
            r#"-  version     = "5.31.0""#,
            r#"+  version     = "5.32.0""#,
            r#"   constraints = "~> 5.0""#,
            r#" }"#,
        ]
        .join("\n");

        let result = parse_one(".terraform.lock.hcl", &patch);

        assert_eq!(
            result,
            vec![DependencyChange {
                name: "registry.terraform.io/hashicorp/aws".to_string(),
                from_version: "5.31.0".to_string(),
                to_version: "5.32.0".to_string(),
                ecosystem: Ecosystem::Terraform,
            }]
        );
    }

    #[test]
    fn terraform_detects_multiple_providers_in_one_lock_file() {
        let patch = [
            r#" provider "registry.terraform.io/hashicorp/aws" {"#,
            r#"-  version     = "5.31.0""#,
            r#"+  version     = "5.32.0""#,
            r#"   constraints = "~> 5.0""#,
            r#" }"#,
            r#""#,
            r#" provider "registry.terraform.io/hashicorp/google" {"#,
            r#"-  version     = "5.10.0""#,
            r#"+  version     = "5.11.0""#,
            r#"   constraints = "~> 5.0""#,
            r#" }"#,
        ]
        .join("\n");

        let result = parse_one(".terraform.lock.hcl", &patch);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "registry.terraform.io/hashicorp/aws");
        assert_eq!(result[0].to_version, "5.32.0");
        assert_eq!(result[1].name, "registry.terraform.io/hashicorp/google");
        assert_eq!(result[1].to_version, "5.11.0");
    }

    #[test]
    fn terraform_tracks_provider_from_added_header_lines() {
        // The header carries a '+' marker; version lines must still
        // attach to it.
        let patch = [
            r#"+provider "registry.terraform.io/hashicorp/azurerm" {"#,
            r#"-  version     = "3.84.0""#,
            r#"+  version     = "3.85.0""#,
            r#"+}"#,
        ]
        .join("\n");

        let result = parse_one(".terraform.lock.hcl", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "registry.terraform.io/hashicorp/azurerm");
    }

    #[test]
    fn terraform_skips_newly_added_providers() {
        let patch = [
            r#"+provider "registry.terraform.io/hashicorp/azurerm" {"#,
            r#"+  version     = "3.85.0""#,
            r#"+  constraints = "~> 3.0""#,
            r#"+}"#,
        ]
        .join("\n");

        assert!(parse_one(".terraform.lock.hcl", &patch).is_empty());
    }

    #[test]
    fn terraform_skips_removed_providers() {
        let patch = [
            r#"-provider "registry.terraform.io/hashicorp/azurerm" {"#,
            r#"-  version     = "3.85.0""#,
            r#"-  constraints = "~> 3.0""#,
            r#"-}"#,
        ]
        .join("\n");

        assert!(parse_one(".terraform.lock.hcl", &patch).is_empty());
    }

    #[test]
    fn terraform_skips_unchanged_versions() {
        let patch = [
            r#" provider "registry.terraform.io/hashicorp/aws" {"#,
            r#"   version     = "5.31.0""#,
            r#"   constraints = "~> 5.0""#,
            r#" }"#,
        ]
        .join("\n");

        assert!(parse_one(".terraform.lock.hcl", &patch).is_empty());
    }

    #[test]
    fn terraform_version_without_provider_header_is_ignored() {
        let patch = [r#"-  version     = "5.31.0""#, r#"+  version     = "5.32.0""#].join("\n");

        assert!(parse_one(".terraform.lock.hcl", &patch).is_empty());
    }

    #[test]
    fn terraform_handles_lock_file_in_subdirectory() {
        let patch = [
            r#" provider "registry.terraform.io/hashicorp/aws" {"#,
            r#"-  version     = "5.31.0""#,
            r#"+  version     = "5.32.0""#,
            r#" }"#,
        ]
        .join("\n");

        let result = parse_one("infra/prod/.terraform.lock.hcl", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ecosystem, Ecosystem::Terraform);
    }

    #[test]
    fn files_without_patch_contribute_nothing() {
        let files = [
            PullRequestFile::without_patch(".terraform.lock.hcl"),
            PullRequestFile::without_patch("package.json"),
            PullRequestFile::without_patch("go.mod"),
        ];

        assert!(parse_dependency_changes(&files).is_empty());
    }

    #[test]
    fn empty_patch_contributes_nothing() {
        assert!(parse_one("package.json", "").is_empty());
    }

    #[test]
    fn npm_detects_version_change_and_strips_range_prefix() {
        let patch = ["-    \"axios\": \"^1.6.0\",", "+    \"axios\": \"^2.0.0\","].join("\n");

        let result = parse_one("package.json", &patch);

        assert_eq!(
            result,
            vec![DependencyChange {
                name: "axios".to_string(),
                from_version: "1.6.0".to_string(),
                to_version: "2.0.0".to_string(),
                ecosystem: Ecosystem::Npm,
            }]
        );
    }

    #[test]
    fn npm_prefix_only_difference_is_not_a_change() {
        // Comparison happens on the captured version, after the ~/^
        // prefix is stripped.
        let patch = ["-    \"axios\": \"~1.6.0\",", "+    \"axios\": \"^1.6.0\","].join("\n");

        assert!(parse_one("package.json", &patch).is_empty());
    }

    #[test]
    fn npm_ignores_non_version_values() {
        let patch = [
            "-    \"main\": \"dist/index.js\",",
            "+    \"main\": \"lib/index.js\",",
        ]
        .join("\n");

        assert!(parse_one("package.json", &patch).is_empty());
    }

    #[test]
    fn npm_matches_package_lock_filename() {
        let patch = ["-    \"lodash\": \"4.17.20\",", "+    \"lodash\": \"4.17.21\","].join("\n");

        let result = parse_one("package-lock.json", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "lodash");
    }

    #[test]
    fn npm_emits_changes_in_added_line_order() {
        let patch = [
            "-    \"axios\": \"^1.6.0\",",
            "-    \"lodash\": \"4.17.20\",",
            "+    \"lodash\": \"4.17.21\",",
            "+    \"axios\": \"^2.0.0\",",
        ]
        .join("\n");

        let result = parse_one("package.json", &patch);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "lodash");
        assert_eq!(result[1].name, "axios");
    }

    #[test]
    fn pip_detects_version_change() {
        let patch = ["-requests==2.28.0", "+requests==2.31.0"].join("\n");

        let result = parse_one("requirements.txt", &patch);

        assert_eq!(
            result,
            vec![DependencyChange {
                name: "requests".to_string(),
                from_version: "2.28.0".to_string(),
                to_version: "2.31.0".to_string(),
                ecosystem: Ecosystem::Pip,
            }]
        );
    }

    #[test]
    fn pip_handles_range_operators() {
        let patch = ["-flask>=2.0,<3", "+flask>=2.3,<3"].join("\n");

        let result = parse_one("requirements.txt", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].from_version, "2.0,<3");
        assert_eq!(result[0].to_version, "2.3,<3");
    }

    #[test]
    fn pip_matches_pipfile() {
        let patch = ["-django~=4.1", "+django~=4.2"].join("\n");

        let result = parse_one("Pipfile", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ecosystem, Ecosystem::Pip);
    }

    #[test]
    fn pip_skips_pure_addition() {
        assert!(parse_one("requirements.txt", "+httpx==0.27.0").is_empty());
    }

    #[test]
    fn go_detects_version_change_without_v_prefix() {
        let patch = [
            "-\tgithub.com/pkg/errors v0.9.0",
            "+\tgithub.com/pkg/errors v0.9.1",
        ]
        .join("\n");

        let result = parse_one("go.mod", &patch);

        assert_eq!(
            result,
            vec![DependencyChange {
                name: "github.com/pkg/errors".to_string(),
                from_version: "0.9.0".to_string(),
                to_version: "0.9.1".to_string(),
                ecosystem: Ecosystem::Go,
            }]
        );
    }

    #[test]
    fn go_ignores_indirect_comment() {
        let patch = [
            "-\tgolang.org/x/text v0.3.7 // indirect",
            "+\tgolang.org/x/text v0.3.8 // indirect",
        ]
        .join("\n");

        let result = parse_one("go.mod", &patch);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to_version, "0.3.8");
    }

    #[test]
    fn go_filename_must_match_exactly() {
        let patch = ["-\tgithub.com/pkg/errors v0.9.0", "+\tgithub.com/pkg/errors v0.9.1"].join("\n");

        assert!(parse_one("vendor/go.mod.bak", &patch).is_empty());
    }

    #[test]
    fn unrecognized_filenames_are_skipped() {
        let patch = ["-gem \"rails\", \"7.0.0\"", "+gem \"rails\", \"7.1.0\""].join("\n");

        assert!(parse_one("Gemfile", &patch).is_empty());
    }

    #[test]
    fn changes_across_multiple_files_accumulate() {
        let npm_patch = ["-  \"axios\": \"^1.6.0\"", "+  \"axios\": \"^2.0.0\""].join("\n");
        let go_patch = ["-\tgithub.com/pkg/errors v0.9.0", "+\tgithub.com/pkg/errors v0.9.1"]
            .join("\n");

        let files = [
            PullRequestFile::with_patch("package.json", &npm_patch),
            PullRequestFile::with_patch("go.mod", &go_patch),
        ];

        let result = parse_dependency_changes(&files);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].ecosystem, Ecosystem::Npm);
        assert_eq!(result[1].ecosystem, Ecosystem::Go);
    }

    #[test]
    fn npm_patterns_cover_import_and_require_forms() {
        let patterns = import_patterns("axios", "npm");

        assert_eq!(patterns.len(), 6);
        assert!(patterns.contains(&"from \"axios\"".to_string()));
        assert!(patterns.contains(&"from 'axios'".to_string()));
        assert!(patterns.contains(&"require(\"axios\")".to_string()));
        assert!(patterns.contains(&"require('axios')".to_string()));
        assert!(patterns.contains(&"from \"axios/".to_string()));
        assert!(patterns.contains(&"from 'axios/".to_string()));
    }

    #[test]
    fn pip_patterns_cover_import_and_from() {
        assert_eq!(
            import_patterns("requests", "pip"),
            vec!["import requests".to_string(), "from requests".to_string()]
        );
    }

    #[test]
    fn go_patterns_cover_exact_and_subpath_imports() {
        assert_eq!(
            import_patterns("github.com/pkg/errors", "go"),
            vec![
                "\"github.com/pkg/errors\"".to_string(),
                "\"github.com/pkg/errors/".to_string(),
            ]
        );
    }

    #[test]
    fn terraform_patterns_use_short_name_from_registry_path() {
        let patterns = import_patterns("registry.terraform.io/hashicorp/aws", "terraform");

        assert!(patterns.contains(&"resource \"aws_".to_string()));
        assert!(patterns.contains(&"data \"aws_".to_string()));
        assert!(patterns.contains(&"provider \"aws\"".to_string()));
        assert!(!patterns.iter().any(|p| p.starts_with("module")));
    }

    #[test]
    fn terraform_patterns_use_short_name_from_org_path() {
        let patterns = import_patterns("hashicorp/google", "terraform");

        assert!(patterns.contains(&"resource \"google_".to_string()));
        assert!(patterns.contains(&"data \"google_".to_string()));
        assert!(patterns.contains(&"provider \"google\"".to_string()));
    }

    #[test]
    fn terraform_bare_name_is_its_own_short_name() {
        let patterns = import_patterns("aws", "terraform");

        assert!(patterns.contains(&"provider \"aws\"".to_string()));
    }

    #[test]
    fn unknown_ecosystem_falls_back_to_the_name() {
        assert_eq!(import_patterns("rails", "rubygems"), vec!["rails".to_string()]);
    }
}
