pub mod config;
pub mod progress;
pub mod prompts;
pub mod rate;
pub mod recent;
pub mod unwatch;
pub mod watch;

use crate::browser;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::debug;
use trakt_watch_config::{Config, PathManager};
use trakt_watch_core::{companion_action, CompanionAction, Prompter, Session};
use trakt_watch_models::{CompanionPolicy, MediaRecord};
use trakt_watch_sources::{TraktApi, TraktClient};

/// Everything a command needs before it talks to the service
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    /// From `-u/--username` or `TRAKT_USERNAME`
    pub username: Option<String>,
}

impl AppContext {
    pub async fn connect(&self) -> Result<TraktClient> {
        self.config.validate().map_err(|e| eyre!("{}", e))?;
        let trakt = self
            .config
            .trakt
            .as_ref()
            .ok_or_else(|| eyre!("Trakt is not configured, run `trakt-watch config trakt`"))?;

        let mut client = TraktClient::new(trakt.client_id.clone(), trakt.client_secret.clone());
        client.authenticate(self.paths.credentials_file()).await?;
        Ok(client)
    }

    /// Flag or env first, then the config file, then whoever the token belongs to
    pub async fn session(&self, client: &TraktClient) -> Result<Session> {
        let configured = self
            .username
            .as_deref()
            .or(self.config.username.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if let Some(name) = configured {
            return Ok(Session::new(name));
        }

        let name = client.current_username().await?;
        debug!("Using username {} from the access token", name);
        Ok(Session::new(name))
    }

    pub fn history_limit(&self, limit: Option<u32>) -> u32 {
        limit.unwrap_or(self.config.history_limit).max(1)
    }
}

/// Open (or offer) the companion site for a record per policy
pub fn open_companion<P: Prompter + ?Sized>(
    policy: CompanionPolicy,
    record: &MediaRecord,
    prompter: &mut P,
    output: &Output,
) -> Result<()> {
    match companion_action(policy, record, prompter)? {
        CompanionAction::Open(url) => {
            if let Err(e) = browser::open_url(&url) {
                output.error(format!("Failed to open browser: {}", e));
            }
        }
        CompanionAction::Unavailable => output.error("Cannot determine Letterboxd URL for entry"),
        CompanionAction::Skip => {}
    }
    Ok(())
}
