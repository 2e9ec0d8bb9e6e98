use clap::{ArgAction, Parser, Subcommand};
use commands::config::ConfigCommand;
use commands::recent::HistoryType;
use commands::{config, progress, rate, recent, unwatch, watch, AppContext};
use trakt_watch_config::{Config, PathManager};
use trakt_watch_core::ResolveError;
use trakt_watch_models::{CompanionPolicy, Rating, WatchedAt};

mod browser;
mod commands;
mod dates;
mod logging;
mod output;

/// Exit status for a user-initiated abort
const EXIT_CANCELLED: i32 = 130;

#[derive(Parser)]
#[command(name = "trakt-watch")]
#[command(about = "Mark movies and episodes watched on trakt.tv, by URL or interactive search")]
#[command(version)]
struct Cli {
    /// Trakt username (defaults to the config file, then the authenticated user)
    #[arg(short, long, env = "TRAKT_USERNAME", global = true)]
    username: Option<String>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn parse_rating(value: &str) -> Result<Rating, String> {
    let number: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    Rating::new(number).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum Commands {
    /// Mark an entry on trakt.tv as watched
    #[command(long_about = "Mark a movie, episode or show as watched. Without --url an interactive search picks the entry. Prints your recent history afterwards.")]
    Watch {
        /// URL to watch, searches interactively when omitted
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Watched at time: now, today, yesterday, released, a date, or 'N hours ago'
        #[arg(short, long, value_name = "DATE", value_parser = dates::parse_watched_at)]
        at: Option<WatchedAt>,

        /// Rating from 1 to 10
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<Rating>,

        /// Open the letterboxd.com entry: always, prompt or never (bare -l means always)
        #[arg(short, long, value_name = "POLICY", num_args = 0..=1, default_missing_value = "always")]
        letterboxd: Option<CompanionPolicy>,
    },
    /// Rate a movie, show or episode
    Rate {
        /// URL to rate, searches interactively when omitted
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Rating from 1 to 10, prompted for when omitted
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<Rating>,

        /// Open the letterboxd.com entry: always, prompt or never (bare -l means always)
        #[arg(short, long, value_name = "POLICY", num_args = 0..=1, default_missing_value = "always")]
        letterboxd: Option<CompanionPolicy>,
    },
    /// Remove a recently watched item from your history
    Unwatch {
        /// Number of history entries to choose from
        limit: Option<u32>,

        /// Pick the entry to remove (default)
        #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "non_interactive")]
        interactive: bool,

        /// Remove the most recent entry without picking
        #[arg(short = 'a', long, action = ArgAction::SetTrue)]
        non_interactive: bool,

        /// Skip confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Show recent history
    Recent {
        /// Number of entries to show
        limit: Option<u32>,

        /// Type of items to print
        #[arg(short = 't', long = "type", value_enum)]
        history_type: Option<HistoryType>,

        /// Print URLs for items
        #[arg(long, action = ArgAction::SetTrue)]
        urls: bool,
    },
    /// Mark the next episode of a show you are watching
    #[command(long_about = "Pick a show from your recent episode history and mark its next unwatched episode as watched.")]
    Progress {
        /// Number of history entries to scan for shows
        limit: Option<u32>,

        /// Count specials (season 0) when finding the next episode
        #[arg(long, action = ArgAction::SetTrue)]
        include_specials: bool,

        /// Skip confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,

        /// Watched at time, as for `watch --at`
        #[arg(short, long, value_name = "DATE", value_parser = dates::parse_watched_at)]
        at: Option<WatchedAt>,
    },
    /// View or change configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Configure Trakt API credentials and authorize (OAuth)
    #[command(long_about = "Store Trakt API credentials and authorize trakt-watch. Create an API application at https://trakt.tv/oauth/applications first.")]
    Trakt {
        /// Trakt Client ID (prompted for when omitted)
        #[arg(long)]
        client_id: Option<String>,

        /// Trakt Client Secret (prompted for when omitted)
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Change one setting: username, history_limit, include_specials, prompt_rating, companion, log_file
    Set { key: String, value: String },
}

impl From<ConfigCommands> for ConfigCommand {
    fn from(cmd: ConfigCommands) -> Self {
        match cmd {
            ConfigCommands::Show { full } => ConfigCommand::Show { full },
            ConfigCommands::Trakt { client_id, client_secret } => ConfigCommand::Trakt { client_id, client_secret },
            ConfigCommands::Set { key, value } => ConfigCommand::Set { key, value },
        }
    }
}

async fn run(command: Commands, ctx: &AppContext, output: &output::Output) -> color_eyre::Result<()> {
    match command {
        Commands::Watch { url, at, rating, letterboxd } => {
            watch::run_watch(url, at, rating, letterboxd, ctx, output).await
        }
        Commands::Rate { url, rating, letterboxd } => rate::run_rate(url, rating, letterboxd, ctx, output).await,
        Commands::Unwatch { limit, interactive: _, non_interactive, yes } => {
            unwatch::run_unwatch(limit, !non_interactive, yes, ctx, output).await
        }
        Commands::Recent { limit, history_type, urls } => {
            recent::run_recent(limit, history_type, urls, ctx, output).await
        }
        Commands::Progress { limit, include_specials, yes, at } => {
            progress::run_progress(limit, include_specials, yes, at, ctx, output).await
        }
        Commands::Config { cmd } => config::run_config(cmd.into(), &ctx.paths, output).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let (config, config_error) = match Config::load_or_default(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    logging::init_logging(cli.verbose, cli.quiet, config.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    if let Some(e) = config_error {
        tracing::warn!("Ignoring unreadable config {}: {}", config_file.display(), e);
    }

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext {
        config,
        paths,
        username: cli.username,
    };

    match run(cli.command, &ctx, &output).await {
        Ok(()) => Ok(()),
        Err(report) => match report.downcast_ref::<ResolveError>() {
            Some(ResolveError::UserCancelled) => {
                output.error("Aborted!");
                std::process::exit(EXIT_CANCELLED);
            }
            _ => Err(report),
        },
    }
}
