use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MODEL};

/// Optional local configuration (`~/.gemini-actions/config.toml`). Every
/// field has a default so a missing file behaves like an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_input_tokens() -> u64 {
    DEFAULT_MAX_INPUT_TOKENS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_input_tokens: default_max_input_tokens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_input_tokens, DEFAULT_MAX_INPUT_TOKENS);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: Config = toml::from_str(r#"model = "gemini-2.5-pro""#).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.max_input_tokens, DEFAULT_MAX_INPUT_TOKENS);
    }
}
