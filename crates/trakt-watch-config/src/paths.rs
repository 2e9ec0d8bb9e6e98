use anyhow::Result;
use std::path::PathBuf;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "TRAKT_WATCH_CONFIG_DIR";

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(Self::with_config_dir(PathBuf::from(dir)));
            }
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("trakt-watch");

        Ok(Self::with_config_dir(base_dir))
    }

    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_config_dir(PathBuf::from(".trakt-watch")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_config_dir() {
        let paths = PathManager::with_config_dir(PathBuf::from("/tmp/tw"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/tw/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/tw/credentials.toml"));
    }
}
