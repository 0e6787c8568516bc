//! CLI for cardroster. Stands in for the host UI: it picks users and shows
//! what the core renders.

mod commands;
mod sink;

use anyhow::Result;
use cardroster_core::config;
use cardroster_core::roster::UserId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_browse, run_config, run_show};

/// Top-level CLI for cardroster.
#[derive(Debug, Parser)]
#[command(name = "cardroster")]
#[command(about = "Browse player card rosters resolved against the Jikan character API", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/cardroster/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve one user's roster and print the cards.
    Show {
        /// User number (1 or more).
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        user: UserId,
    },

    /// Interactive: show a user, then switch users by typing their number (q quits).
    Browse {
        /// User shown at start-up.
        #[arg(long, default_value = "1", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        start_user: UserId,
    },

    /// Print the effective configuration and its path.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let (cfg, path) = match cli.config {
            Some(path) => (config::load_from_path(&path)?, path),
            None => (config::load_or_init()?, config::config_path()?),
        };
        tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);

        match cli.command {
            CliCommand::Show { user } => run_show(&cfg, user).await?,
            CliCommand::Browse { start_user } => run_browse(&cfg, start_user).await?,
            CliCommand::Config => run_config(&cfg, &path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
