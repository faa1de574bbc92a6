//! Reactify - converts a tree of static HTML pages into a routed React app.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod dom;
mod logger;
mod project;
mod transpile;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Init { dry } => cli::init::init_project(&config, *dry),
        Commands::Build => {
            let report = cli::build::build_project(&config)?;
            if !report.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Watch { .. } => watch::watch(&config),
        Commands::Convert { file } => cli::convert::convert_file(&config, file),
    }
}
