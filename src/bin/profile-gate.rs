//! profile-gate CLI Binary
//!
//! Command-line interface for validating pipeline profiles.

use anyhow::Context;
use clap::Parser;
use profile_gate::cli::{exit_code, map_error, Cli, RunContext, EXIT_FAILURE, EXIT_REJECTED};
use profile_gate::config::ConfigLoader;
use profile_gate::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    info!("profile-gate starting");

    let context = match RunContext::new(
        cli.workspace.clone(),
        cli.config.clone(),
        cli.profiles_dir.clone(),
    ) {
        Ok(ctx) => ctx.with_format(cli.format),
        Err(e) => {
            error!("Error initializing profile gate: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    match context.execute(&cli.command) {
        Ok(outcome) => {
            println!("{}", outcome.output.trim_end());
            if !outcome.ok {
                process::exit(EXIT_REJECTED);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .with_context(|| format!("loading {}", config_path.display())),
        None => ConfigLoader::load(&cli.workspace).context("loading layered configuration"),
    };
    let mut config = match loaded {
        Ok(config) => config.logging,
        Err(e) => {
            // Reported again, with exit status, when the run context loads configuration.
            eprintln!("Warning: {:#}; using default logging", e);
            LoggingConfig::default()
        }
    };

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
