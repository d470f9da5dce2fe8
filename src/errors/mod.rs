use std::fmt;
use std::error::Error as StdError;
use crate::enums::gemini_error::GeminiError;

#[derive(Debug, Clone)]
pub enum ActionError {
    // Configuration errors
    ConfigurationError {
        message: String,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Missing action inputs (environment variables or flags)
    MissingInput {
        name: String,
        suggestion: String,
    },
    InvalidInput {
        input: String,
        expected: String,
    },

    // GitHub API errors
    GitHubError {
        operation: String,
        status_code: Option<u16>,
        reason: String,
    },

    // Datadog API errors
    DatadogError {
        operation: String,
        reason: String,
    },

    // Gemini errors
    GeminiError {
        operation: String,
        reason: String,
    },

    // Parser errors (model replies, config files, API payloads)
    ParseError {
        content_type: String,
        reason: String,
    },

    // Network/transport errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl ActionError {
    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn missing_input(name: &str, suggestion: &str) -> Self {
        Self::MissingInput {
            name: name.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    pub fn invalid_input(input: &str, expected: &str) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn github_error(operation: &str, status_code: Option<u16>, reason: &str) -> Self {
        Self::GitHubError {
            operation: operation.to_string(),
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn datadog_error(operation: &str, reason: &str) -> Self {
        Self::DatadogError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn gemini_error(operation: &str, reason: &str) -> Self {
        Self::GeminiError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::MissingInput { name, suggestion } => {
                format!("Missing required input '{}'\n💡 {}", name, suggestion)
            }
            Self::InvalidInput { input, expected } => {
                format!("Invalid input '{}': expected {}", input, expected)
            }
            Self::GitHubError { operation, status_code, reason } => {
                let mut msg = format!("GitHub API error during {}: {}", operation, reason);
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg
            }
            Self::DatadogError { operation, reason } => {
                format!("Datadog API error during {}: {}", operation, reason)
            }
            Self::GeminiError { operation, reason } => {
                format!("Gemini error during {}: {}", operation, reason)
            }
            Self::ParseError { content_type, reason } => {
                format!("Parse error in {}: {}\n💡 Check the format and syntax of the input", content_type, reason)
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check your internet connection and try again");
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for ActionError {}

pub type ActionResult<T> = Result<T, ActionError>;

/// Convert from standard library errors
impl From<std::io::Error> for ActionError {
    fn from(error: std::io::Error) -> Self {
        ActionError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(error: serde_json::Error) -> Self {
        ActionError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ActionError {
    fn from(error: toml::de::Error) -> Self {
        ActionError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(error: reqwest::Error) -> Self {
        ActionError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

impl From<GeminiError> for ActionError {
    fn from(error: GeminiError) -> Self {
        ActionError::GeminiError {
            operation: "content generation".to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_message_includes_suggestion() {
        let err = ActionError::missing_input("GEMINI_API_KEY", "Export GEMINI_API_KEY before running");
        let msg = err.user_message();
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("Export GEMINI_API_KEY"));
    }

    #[test]
    fn github_error_message_includes_status() {
        let err = ActionError::github_error("get pull request", Some(404), "Not Found");
        assert!(err.user_message().contains("Status: 404"));
    }
}
