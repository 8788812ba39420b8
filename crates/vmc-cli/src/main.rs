//! college-finder CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use vmc_cli::config::{Overrides, load_config};
use vmc_cli::logging::{LogConfig, LogFormat, init_logging};
use vmc_cli::render::error_message;
use vmc_client::DirectoryClient;
use vmc_session::Driver;

mod browse;
mod cli;
mod commands;

use crate::browse::run_browse;
use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_cities, run_colleges, run_search, run_specializations, run_streams};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {}", error_message(&error));
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<()> {
    if let Command::Streams(args) = &cli.command {
        run_streams(args);
        return Ok(());
    }
    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        page_size: cli.page_size,
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    let client = DirectoryClient::new(&config).context("create directory client")?;
    match &cli.command {
        Command::Streams(args) => run_streams(args),
        Command::Specializations(args) => run_specializations(&client, args).await?,
        Command::Cities(args) => run_cities(&client, args).await?,
        Command::Colleges(args) => run_colleges(&client, args, config.page_size).await?,
        Command::Search(args) => run_search(&client, args, config.page_size).await?,
        Command::Browse => run_browse(&Driver::new(client), config.page_size).await?,
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
