//! sitefeed - RSS 2.0 feed generator for static site content.

mod cli;
mod collector;
mod config;
mod feed;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // init runs before a config exists
    if let Commands::Init { force } = cli.command {
        return cli::init::init_config(&cli.config, force);
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Build { .. } => cli::build::build_feed(&config),
        Commands::List { json, pretty, .. } => cli::list::list_items(&config, *json, *pretty),
        Commands::Check { .. } => cli::check::check_feed(&config),
    }
}
