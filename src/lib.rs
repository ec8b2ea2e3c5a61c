//! lifetracker library root.
//! Exposes the CLI parser, the high-level `run()` function and the store,
//! views and helpers behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;
pub mod views;

use crate::cli::commands;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::seed::seed_default_event_types;
use crate::errors::AppResult;
use crate::store::Store;
use crate::utils::path::db_override;
use clap::Parser;
use std::fs;
use std::path::Path;

/// Open the configured database, creating its directory when needed.
/// Migrations run on open; the default types are created on first use.
pub fn open_store(cfg: &Config) -> AppResult<Store> {
    if let Some(parent) = Path::new(&cfg.database).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let store = Store::open(&cfg.database)?;
    if cfg.seed_defaults {
        seed_default_event_types(&store)?;
    }
    Ok(store)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => return commands::init::handle(cli, cfg),
        Commands::Config { .. } => return commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => return commands::db::handle(&cli.command, cfg),
        _ => {}
    }

    let store = open_store(cfg)?;

    match &cli.command {
        Commands::Log { .. } => commands::log::handle(&cli.command, &store),
        Commands::Register { .. } => commands::register::handle(&cli.command, &store),
        Commands::History { .. } => commands::history::handle(&cli.command, &store),
        Commands::Recent { .. } => commands::recent::handle(&cli.command, &store, cfg),
        Commands::Del { .. } => commands::del::handle(&cli.command, &store),
        Commands::Types { .. } => commands::types::handle(&cli.command, &store),
        Commands::Export { .. } => commands::export::handle(&cli.command, &store),
        Commands::Import { .. } => commands::import::handle(&cli.command, &store),
        Commands::Shell => commands::shell::handle(&store, cfg),
        Commands::Init | Commands::Config { .. } | Commands::Db { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // `--db` wins over the configured database for this invocation only.
    if let Some(custom_db) = &cli.db {
        cfg.database = db_override(custom_db).to_string_lossy().to_string();
    }

    dispatch(&cli, &cfg)
}
