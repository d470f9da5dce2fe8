use std::env;
use std::fs;
use std::path::Path;
use crate::config::constants::GITHUB_REPOSITORY_ENV;
use crate::errors::{ActionError, ActionResult};
use crate::structs::config::config::Config;
use crate::structs::github::repo_context::RepoContext;

pub struct ConfigManager;

impl ConfigManager {
    /// Load `~/.gemini-actions/config.toml` when present, defaults otherwise.
    pub fn load() -> ActionResult<Config> {
        let config_path = dirs::home_dir()
            .map(|d| d.join(".gemini-actions/config.toml"))
            .unwrap_or_default();

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            return Self::load_from(&config_path);
        }

        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> ActionResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| ActionError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read a required secret or setting from the environment.
    pub fn require_env(name: &str) -> ActionResult<String> {
        env::var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ActionError::missing_input(name, &format!("Export {} before running", name))
            })
    }

    /// Repository coordinates from `GITHUB_REPOSITORY` ("owner/repo").
    pub fn repo_context() -> ActionResult<RepoContext> {
        let raw = Self::require_env(GITHUB_REPOSITORY_ENV)?;
        Self::parse_repo_context(&raw)
    }

    pub fn parse_repo_context(raw: &str) -> ActionResult<RepoContext> {
        match raw.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(RepoContext {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(ActionError::invalid_input(raw, "\"owner/repo\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_owner_and_repo() {
        let ctx = ConfigManager::parse_repo_context("dortort/gemini-actions").unwrap();
        assert_eq!(ctx.owner, "dortort");
        assert_eq!(ctx.repo, "gemini-actions");
    }

    #[test]
    fn rejects_malformed_repository() {
        assert!(ConfigManager::parse_repo_context("no-slash").is_err());
        assert!(ConfigManager::parse_repo_context("/repo").is_err());
        assert!(ConfigManager::parse_repo_context("owner/").is_err());
    }

    #[test]
    fn loads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-2.5-flash\"").unwrap();

        let config = ConfigManager::load_from(file.path()).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(ConfigManager::load_from(Path::new("/nonexistent/config.toml")).is_err());
    }
}
