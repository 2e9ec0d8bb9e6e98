use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trakt_watch_models::CompanionPolicy;

const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID";
const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_CLIENT_SECRET";

/// Keys accepted by `Config::set_value`
pub const SETTABLE_KEYS: &[&str] = &[
    "username",
    "history_limit",
    "include_specials",
    "prompt_rating",
    "companion",
    "log_file",
];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Default username when neither the flag nor TRAKT_USERNAME is set
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
    #[serde(default)]
    pub include_specials: bool,
    #[serde(default = "default_true")]
    pub prompt_rating: bool,
    #[serde(default)]
    pub companion: CompanionPolicy,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    // Tables must come after plain values for TOML serialization
    #[serde(default)]
    pub trakt: Option<TraktConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktConfig {
    pub client_id: String,
    pub client_secret: String,
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            history_limit: default_history_limit(),
            include_specials: false,
            prompt_rating: default_true(),
            companion: CompanionPolicy::default(),
            log_file: None,
            trakt: None,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("{} expects true or false, got '{}'", key, other)),
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.history_limit == 0 {
            return Err(anyhow::anyhow!("history_limit must be at least 1"));
        }

        let trakt = self
            .trakt
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Trakt is not configured, run `trakt-watch config trakt`"))?;
        if trakt.client_id.is_empty() || trakt.client_id == PLACEHOLDER_CLIENT_ID {
            return Err(anyhow::anyhow!("Trakt client_id is not configured"));
        }
        if trakt.client_secret.is_empty() || trakt.client_secret == PLACEHOLDER_CLIENT_SECRET {
            return Err(anyhow::anyhow!("Trakt client_secret is not configured"));
        }

        Ok(())
    }

    pub fn is_trakt_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Update one setting from its string form, as given on the command line
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "username" => {
                let value = value.trim();
                self.username = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "history_limit" => {
                let limit: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("history_limit expects a number, got '{}'", value))?;
                if limit == 0 {
                    return Err(anyhow::anyhow!("history_limit must be at least 1"));
                }
                self.history_limit = limit;
            }
            "include_specials" => self.include_specials = parse_bool(key, value)?,
            "prompt_rating" => self.prompt_rating = parse_bool(key, value)?,
            "companion" => self.companion = value.parse()?,
            "log_file" => {
                let value = value.trim();
                self.log_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown setting '{}', expected one of: {}",
                    other,
                    SETTABLE_KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            username: Some("sean".to_string()),
            history_limit: 25,
            companion: CompanionPolicy::Prompt,
            trakt: Some(TraktConfig {
                client_id: "test_id".to_string(),
                client_secret: "test_secret".to_string(),
            }),
            ..Config::default()
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.trakt.as_ref().unwrap().client_id, "test_id");
        assert_eq!(loaded.trakt.as_ref().unwrap().client_secret, "test_secret");
        assert_eq!(loaded.username.as_deref(), Some("sean"));
        assert_eq!(loaded.history_limit, 25);
        assert_eq!(loaded.companion, CompanionPolicy::Prompt);
        assert!(loaded.prompt_rating);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config {
            trakt: Some(TraktConfig {
                client_id: "YOUR_CLIENT_ID".to_string(),
                client_secret: "YOUR_CLIENT_SECRET".to_string(),
            }),
            ..Config::default()
        };

        assert!(config.validate().is_err());
        assert!(!config.is_trakt_configured());

        config.trakt = Some(TraktConfig {
            client_id: "real_id".to_string(),
            client_secret: "real_secret".to_string(),
        });
        assert!(config.validate().is_ok());
        assert!(config.is_trakt_configured());

        config.history_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.history_limit, 10);
        assert!(!config.include_specials);
        assert!(config.prompt_rating);
        assert_eq!(config.companion, CompanionPolicy::Never);
        assert!(config.trakt.is_none());
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("companion", "always").unwrap();
        config.set_value("include_specials", "yes").unwrap();
        config.set_value("history_limit", "5").unwrap();
        config.set_value("username", "  ").unwrap();

        assert_eq!(config.companion, CompanionPolicy::Always);
        assert!(config.include_specials);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.username, None);

        assert!(config.set_value("history_limit", "0").is_err());
        assert!(config.set_value("prompt_rating", "maybe").is_err());
        assert!(config.set_value("colour", "red").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.history_limit, 10);
    }
}
