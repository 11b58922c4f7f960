//! Patient influx analyzer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use influx_cli::cache::LoadCache;
use influx_cli::logging::{LogConfig, LogFormat, init_logging};
use influx_cli::pipeline::{EXIT_FAILURE, EXIT_OK, exit_code};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use crate::commands::{run_analyze, run_columns, run_departments};
use crate::summary::{print_analysis, print_columns, print_departments, print_error, print_json};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }
    let code = match run(&cli.command) {
        Ok(()) => EXIT_OK,
        Err(error) => {
            print_error(&error);
            exit_code(&error)
        }
    };
    std::process::exit(code);
}

fn run(command: &Command) -> anyhow::Result<()> {
    let mut cache = LoadCache::new();
    match command {
        Command::Columns(args) => {
            let report = run_columns(&mut cache, args)?;
            match args.output {
                OutputArg::Table => print_columns(&report),
                OutputArg::Json => print_json(&report)?,
            }
        }
        Command::Departments(args) => {
            let report = run_departments(&mut cache, args)?;
            match args.output {
                OutputArg::Table => print_departments(&report),
                OutputArg::Json => print_json(&report)?,
            }
        }
        Command::Analyze(args) => {
            let report = run_analyze(&mut cache, args)?;
            match args.output {
                OutputArg::Table => print_analysis(&report),
                OutputArg::Json => print_json(&report)?,
            }
        }
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
