// CLI module - command-line argument parsing and handlers
//
// Runtime flags (ledger file, headless mode) plus a `config` subcommand for
// inspecting the effective configuration.

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Account panel - profile editing and loyalty points in the terminal
#[derive(Parser, Debug)]
#[command(name = "account-panel")]
#[command(version = VERSION)]
#[command(about = "Storefront account panel: profile and loyalty points", long_about = None)]
pub struct Cli {
    /// JSON ledger of transactions to show instead of the sample
    #[arg(long, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Run a scripted session with logs on stdout instead of the TUI
    #[arg(long)]
    pub no_tui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle subcommands. Returns true if one was handled (exit after).
pub fn handle_command(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::Config { show, path }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show()?;
            } else {
                println!("Usage: account-panel config [--show|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn handle_config_path() -> anyhow::Result<()> {
    let path = Config::config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    Ok(())
}
