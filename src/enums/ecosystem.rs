use std::fmt;
use serde::{Deserialize, Serialize};

/// Package ecosystem a dependency change was detected in. Determined
/// entirely by the filename of the changed manifest or lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Pip,
    Go,
    Terraform,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
            Ecosystem::Go => "go",
            Ecosystem::Terraform => "terraform",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(Ecosystem::Npm.to_string(), "npm");
        assert_eq!(Ecosystem::Pip.to_string(), "pip");
        assert_eq!(Ecosystem::Go.to_string(), "go");
        assert_eq!(Ecosystem::Terraform.to_string(), "terraform");
    }
}
