use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether to open the companion site entry after an action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompanionPolicy {
    Always,
    Prompt,
    #[default]
    Never,
}

impl FromStr for CompanionPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" | "true" | "yes" => Ok(Self::Always),
            "prompt" | "ask" => Ok(Self::Prompt),
            "never" | "false" | "no" => Ok(Self::Never),
            other => Err(ModelError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for CompanionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Always => "always",
            Self::Prompt => "prompt",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}
