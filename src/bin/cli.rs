//! compwatch CLI
//!
//! Single-run entry point meant to be invoked by a scheduler (cron, systemd
//! timer, Task Scheduler).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use compwatch::{
    error::{AppError, Result},
    models::{Config, Settings},
    pipeline::{self, RunOptions, RunOutcome},
    services::{KaggleClient, MAX_PAGES, SmtpMailer},
    storage::{HistoryStore, LocalHistory},
};

/// compwatch - Kaggle competition digest mailer
#[derive(Parser, Debug)]
#[command(
    name = "compwatch",
    version,
    about = "Emails new Kaggle competitions matching your filters"
)]
struct Cli {
    /// Directory holding config.toml and the history file
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Path to the config file (default: {data_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, filter, and mail new competitions (default)
    Run {
        /// Print the digest instead of sending it; history is not updated
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show config and history locations
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load `.env` (or an explicit env file). Variables already set win.
fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                AppError::config(format!("cannot load env file {}: {e}", path.display()))
            })?;
            log::debug!("Loaded environment from {}", path.display());
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                log::debug!("Loaded environment from {}", path.display());
            }
        }
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    load_env_file(cli.env_file.as_deref())?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("config.toml"));

    match cli.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => {
            log::info!("compwatch starting...");

            let config = Config::load(&config_path)?;
            log::info!("Loaded configuration from {}", config_path.display());

            let settings = Settings::from_env()?;
            let history = LocalHistory::new(config.history_path(&cli.data_dir));
            let source = KaggleClient::new(&config.source, settings.kaggle)?;
            let mailer = SmtpMailer::new(settings.smtp);

            let outcome = pipeline::run_pipeline(
                &config.filters,
                &history,
                &source,
                &mailer,
                RunOptions { dry_run },
            )
            .await?;

            if let RunOutcome::DryRun { digest, .. } = &outcome {
                println!("{digest}");
            }
            log::info!("Done! {} new competition(s).", outcome.matched_count());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = Config::load(&config_path)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!("✓ Config OK ({})", config_path.display());
            match config.filters.allow_list() {
                Some(categories) => log::info!("    categories: {}", categories.join(", ")),
                None => log::info!("    categories: any"),
            }
            log::info!("    tabular only: {}", config.filters.tabular_only());
            log::info!("    listing API: {}", config.source.base_url);
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());
            log::info!(
                "Config: {} ({})",
                config_path.display(),
                if config_path.exists() { "exists" } else { "not found" }
            );

            let history_path = match Config::load(&config_path) {
                Ok(config) => config.history_path(&cli.data_dir),
                Err(_) => cli.data_dir.join("sent_competitions.json"),
            };
            let history = LocalHistory::new(&history_path);
            if history_path.exists() {
                let titles = history.load().await?;
                log::info!(
                    "History: {} ({} titles notified)",
                    history_path.display(),
                    titles.len()
                );
            } else {
                log::info!("History: {} (not created yet)", history_path.display());
            }
            log::info!("Listing window: {} pages per run", MAX_PAGES);
        }
    }

    Ok(())
}
