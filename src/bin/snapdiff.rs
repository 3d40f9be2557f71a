//! Snapdiff CLI Binary
//!
//! Exit codes: 0 on success, 1 on a failed run, 2 on invalid arguments.

use clap::{CommandFactory, Parser};
use snapdiff::api::SnapshotDiff;
use snapdiff::cli::{format_summary, map_error, validate_args, Cli};
use snapdiff::config::{ConfigLoader, RunConfig, SnapdiffConfig};
use snapdiff::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => match ConfigLoader::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", map_error(&e));
                process::exit(EXIT_FAILURE);
            }
        },
        None => SnapdiffConfig::default(),
    };

    let logging_config = build_logging_config(&cli, file_config.logging.clone());
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    let args = match validate_args(
        cli.source.as_deref(),
        cli.target.as_deref(),
        cli.output.as_deref(),
    ) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}\n", e);
            let _ = Cli::command().write_help(&mut std::io::stderr());
            process::exit(EXIT_USAGE);
        }
    };

    let settings = cli.apply_diff_overrides(file_config.diff);
    let run_config = RunConfig::from_settings(args.source, args.target, args.output, &settings);

    match SnapshotDiff::new(run_config).run() {
        Ok(summary) => {
            info!("Run completed successfully");
            println!("{}", format_summary(&summary));
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Build logging configuration from CLI flags over the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
