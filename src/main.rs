// Account Panel - storefront account page in the terminal
//
// Lets a signed-in shopper edit their profile and review loyalty points,
// talking to an account service over channels.
//
// Architecture:
// - Account service (tokio task): applies profile updates and logouts, publishes identity
// - Controllers: profile edit form, account dropdown, notification bridge
// - Loyalty: tier table, standing and ledger derived from config or a JSON file
// - TUI (ratatui): renders the page and routes input to the controllers
// - Event system: mpsc for commands and outcomes, watch for identity

mod cli;
mod config;
mod dropdown;
mod events;
mod headless;
mod identity;
mod logging;
mod loyalty;
mod notify;
mod profile;
mod service;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use loyalty::ledger::{load_transactions, sample_transactions};
use loyalty::LoyaltyAccount;
use service::AccountService;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rolling file writer for JSON logs, if enabled and the directory is usable
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(file_appender))
}

/// Initialize tracing with conditional output
///
/// In TUI mode logs go to the in-memory buffer (stdout would garble the
/// display); headless logs go to stdout. File logging is added on top.
/// Precedence: RUST_LOG env var > config file > default "info".
///
/// The returned guard must live until exit so file logs flush.
fn init_tracing(config: &Config, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("account_panel={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stdout_layer = (!config.enable_tui).then(|| tracing_subscriber::fmt::layer());

    let (file_layer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

/// Build the loyalty account from config, reading the ledger file if set
fn load_account(config: &Config) -> Result<LoyaltyAccount> {
    let tiers = config
        .loyalty
        .tier_table()
        .context("Invalid [loyalty] tier table")?;

    let transactions = match &config.loyalty.ledger {
        Some(path) => load_transactions(path)?,
        None => sample_transactions(),
    };

    LoyaltyAccount::new(
        config.loyalty.current_points,
        config.loyalty.total_earned,
        transactions,
        &tiers,
    )
    .context("Invalid loyalty account")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (config --show, --path) exit early
    if cli::handle_command(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    if cli.no_tui {
        config.enable_tui = false;
    }
    if let Some(ledger) = cli.ledger {
        config.loyalty.ledger = Some(ledger);
    }

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    let account = load_account(&config)?;
    tracing::info!(
        "Loaded {} transactions, tier {}",
        account.transactions.len(),
        account.standing.tier
    );

    let handle = AccountService::spawn(&config.account);

    // UI state is single-threaded, so both modes run on the main task
    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(handle, account, log_buffer, &config).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running scripted session");
        headless::run_headless(handle, account, &config).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
