//! CLI for the organisation accounts client.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orgacct_core::{config, Client};
use std::path::PathBuf;
use uuid::Uuid;

use commands::{run_create, run_delete, run_fetch, run_list};

/// Top-level CLI for the organisation accounts API.
#[derive(Debug, Parser)]
#[command(name = "orgacct")]
#[command(about = "orgacct: manage organisation accounts", long_about = None)]
pub struct Cli {
    /// API base URL; overrides the config file and API_BASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Read configuration from this file instead of ~/.config/orgacct/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List accounts, optionally one page at a time (pages are zero-indexed).
    List {
        #[arg(long, value_name = "N")]
        page_number: Option<u32>,
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
    },

    /// Show one account.
    Fetch {
        /// Account identifier (UUID).
        id: Uuid,
    },

    /// Create the account(s) described in a JSON file (one object or an array).
    Create {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Delete an account at a given version.
    Delete {
        /// Account identifier (UUID).
        id: Uuid,
        /// Version last observed for the account.
        #[arg(long)]
        version: i64,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        let mut cfg = cfg.apply_env();
        if let Some(url) = cli.base_url {
            cfg.base_url = url;
        }
        cfg.validate()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let client = Client::from_config(&cfg)
            .with_context(|| format!("building client for {}", cfg.base_url))?;

        match cli.command {
            CliCommand::List {
                page_number,
                page_size,
            } => run_list(&client, page_number, page_size)?,
            CliCommand::Fetch { id } => run_fetch(&client, id)?,
            CliCommand::Create { path } => run_create(&client, &path)?,
            CliCommand::Delete { id, version } => run_delete(&client, id, version)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
