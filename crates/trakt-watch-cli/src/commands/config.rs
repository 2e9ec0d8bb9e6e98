use super::prompts;
use crate::browser;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use trakt_watch_config::{Config, CredentialStore, PathManager, TraktConfig};
use trakt_watch_sources::trakt::auth;

pub enum ConfigCommand {
    Show { full: bool },
    Trakt { client_id: Option<String>, client_secret: Option<String> },
    Set { key: String, value: String },
}

pub async fn run_config(cmd: ConfigCommand, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommand::Show { full } => show_config(full, paths, output),
        ConfigCommand::Trakt { client_id, client_secret } => {
            configure_trakt(client_id, client_secret, paths, output).await
        }
        ConfigCommand::Set { key, value } => set_value(&key, &value, paths, output),
    }
}

fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.println("Run 'trakt-watch config trakt' to create it.");
        return Ok(());
    }
    let config = load_config(paths)?;

    let mut cred_store = CredentialStore::new(paths.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let token_expires = cred_store
        .get_trakt_token_expires()
        .map(|expires| expires.to_rfc3339());

    let secret = |value: &str| if full { value.to_string() } else { mask_string(value) };
    let client_id = config.trakt.as_ref().map(|t| secret(&t.client_id));
    let client_secret = config.trakt.as_ref().map(|t| secret(&t.client_secret));

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            let not_set = || "<not set>".bright_black().to_string();
            table.add_row(vec![
                Cell::new("username"),
                Cell::new(config.username.clone().unwrap_or_else(not_set)),
            ]);
            table.add_row(vec![Cell::new("history_limit"), Cell::new(config.history_limit)]);
            table.add_row(vec![Cell::new("include_specials"), Cell::new(config.include_specials)]);
            table.add_row(vec![Cell::new("prompt_rating"), Cell::new(config.prompt_rating)]);
            table.add_row(vec![Cell::new("companion"), Cell::new(config.companion)]);
            table.add_row(vec![
                Cell::new("log_file"),
                Cell::new(
                    config
                        .log_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(not_set),
                ),
            ]);
            table.add_row(vec![
                Cell::new("trakt.client_id"),
                Cell::new(client_id.unwrap_or_else(not_set)),
            ]);
            table.add_row(vec![
                Cell::new("trakt.client_secret"),
                Cell::new(client_secret.unwrap_or_else(not_set)),
            ]);
            table.add_row(vec![
                Cell::new("token expires"),
                Cell::new(token_expires.unwrap_or_else(not_set)),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "username": config.username,
                "history_limit": config.history_limit,
                "include_specials": config.include_specials,
                "prompt_rating": config.prompt_rating,
                "companion": config.companion,
                "log_file": config.log_file,
                "trakt": {
                    "client_id": client_id,
                    "client_secret": client_secret,
                    "token_expires": token_expires,
                },
            }));
        }
    }
    Ok(())
}

fn set_value(key: &str, value: &str, paths: &PathManager, output: &Output) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = paths.config_file();
    let mut config = load_config(paths)?;
    config.set_value(key, value).map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Set {} = {}", key, value));
    Ok(())
}

/// Stored client credentials, or empty ones to prompt from scratch
fn existing_trakt(config: &Config) -> TraktConfig {
    config.trakt.clone().unwrap_or(TraktConfig {
        client_id: String::new(),
        client_secret: String::new(),
    })
}

async fn configure_trakt(
    client_id_arg: Option<String>,
    client_secret_arg: Option<String>,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = paths.config_file();
    let mut config = load_config(paths)?;
    let existing = existing_trakt(&config);

    print_section_header("Trakt API Setup", output);
    print_instruction_list(
        &[
            "Login to Trakt and open your API apps page: https://trakt.tv/oauth/applications",
            "Create a new API application named 'trakt-watch'",
            "Use 'urn:ietf:wg:oauth:2.0:oob' as the Redirect URI",
        ],
        output,
    );
    output.println("");

    let client_id = match client_id_arg {
        Some(id) => id,
        None => loop {
            let default = Some(existing.client_id.as_str()).filter(|id| !id.is_empty());
            let input = prompts::prompt_string("Trakt Client ID", default)?;
            match validate_client_id(input.trim()) {
                Ok(()) => break input.trim().to_string(),
                Err(e) => output.error(format!("Validation error: {}", e)),
            }
        },
    };
    let client_secret = match client_secret_arg {
        Some(secret) => secret,
        None => loop {
            let input = prompts::prompt_password("Trakt Client Secret")?;
            if !input.trim().is_empty() {
                break input.trim().to_string();
            }
            output.error("Client Secret cannot be empty");
        },
    };

    config.trakt = Some(TraktConfig {
        client_id: client_id.clone(),
        client_secret: client_secret.clone(),
    });
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    let credentials_file = paths.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let client = auth::create_trakt_client();
    let refreshed = match cred_store.get_trakt_refresh_token() {
        Some(refresh_token) => {
            print_oauth_progress("Attempting to refresh Trakt token...", output);
            match auth::refresh_access_token(&client, &client_id, &client_secret, refresh_token).await {
                Ok(token_info) => Some(token_info),
                Err(e) => {
                    tracing::debug!("Refresh failed: {}", e);
                    print_oauth_progress("Token refresh failed. Starting new authorization...", output);
                    None
                }
            }
        }
        None => None,
    };

    let token_info = match refreshed {
        Some(token_info) => token_info,
        None => {
            let url = auth::authorize_url(&client_id);
            print_oauth_progress("Open this URL and authorize trakt-watch:", output);
            output.println(format!("  {}", url));
            if let Err(e) = browser::open_url(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
            let code = prompts::prompt_string("Authorization code", None)?;
            auth::exchange_code(&client, &client_id, &client_secret, &code).await?
        }
    };

    cred_store.set_trakt_access_token(token_info.access_token);
    cred_store.set_trakt_refresh_token(token_info.refresh_token);
    cred_store.set_trakt_token_expires(token_info.expires_at);
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success("Trakt authentication successful!");
    output.println(format!("  Access token expires at: {}", token_info.expires_at.bright_green()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == "YOUR_CLIENT_ID" || s == "YOUR_CLIENT_SECRET" {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn validate_client_id(input: &str) -> Result<(), &'static str> {
    if input.is_empty() {
        return Err("Client ID cannot be empty");
    }
    if input.len() < 10 {
        return Err("Client ID seems too short. Please verify it's correct.");
    }
    Ok(())
}

fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.len()).bright_cyan()));
}

fn print_instruction_list(items: &[&str], output: &Output) {
    for (idx, item) in items.iter().enumerate() {
        output.println(format!("  {}. {}", idx + 1, item));
    }
}

fn print_oauth_progress(message: &str, output: &Output) {
    output.println(format!("{} {}", "→".bright_blue(), message.bright_white()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("YOUR_CLIENT_ID"), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }

    #[test]
    fn test_validate_client_id() {
        assert!(validate_client_id("").is_err());
        assert!(validate_client_id("short").is_err());
        assert!(validate_client_id("0123456789abcdef").is_ok());
    }

    #[test]
    fn test_set_value_persists() {
        let dir = tempdir().unwrap();
        let paths = PathManager::with_config_dir(dir.path().join("trakt-watch"));
        let output = Output::new(OutputFormat::Human, true);

        set_value("history_limit", "25", &paths, &output).unwrap();
        set_value("companion", "prompt", &paths, &output).unwrap();
        assert!(set_value("history_limit", "0", &paths, &output).is_err());
        assert!(set_value("colour", "red", &paths, &output).is_err());

        let config = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.companion, trakt_watch_models::CompanionPolicy::Prompt);
    }

    #[test]
    fn test_existing_trakt_keeps_stored_credentials() {
        let mut config = Config::default();
        assert!(existing_trakt(&config).client_id.is_empty());

        config.trakt = Some(TraktConfig {
            client_id: "0123456789abcdef".to_string(),
            client_secret: "secret".to_string(),
        });
        let existing = existing_trakt(&config);
        assert_eq!(existing.client_id, "0123456789abcdef");
        assert_eq!(existing.client_secret, "secret");
        assert!(config.trakt.is_some());
    }
}
