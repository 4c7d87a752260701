//! Logging System
//!
//! Structured logging through `tracing`. Level, format, and destination come
//! from configuration, overridden by `PROFILE_GATE_LOG*` environment variables.
//! Output defaults to stderr so machine-readable command output on stdout stays clean.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable to skip subscriber installation entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!("Invalid log level: {}", self.level));
        }
        if self.format != "json" && self.format != "text" {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        let output = parse_output(&self.output)?;
        if output == Output::File && self.file.is_none() {
            return Err("Log output 'file' requires logging.file".to_string());
        }
        Ok(())
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (folded into the config by the caller)
/// 2. Environment variables (PROFILE_GATE_LOG, PROFILE_GATE_LOG_FORMAT, ...)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ProfileError> {
    if config.is_some_and(|c| !c.enabled) {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && output != Output::File;

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => BoxMakeWriter::new(Arc::new(open_log_file(config)?)),
    };

    let base_subscriber = Registry::default().with(filter);
    let installed = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    installed.map_err(|e| ProfileError::LoggingError(e.to_string()))
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ProfileError> {
    let log_file = config.and_then(|c| c.file.clone()).ok_or_else(|| {
        ProfileError::LoggingError("Log output 'file' requires a log file path".to_string())
    })?;

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProfileError::LoggingError(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            ProfileError::LoggingError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ProfileError> {
    if let Ok(filter) = EnvFilter::try_from_env("PROFILE_GATE_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            filter = filter.add_directive(parse_directive(module, module_level)?);
        }
    }

    if let Ok(modules_str) = std::env::var("PROFILE_GATE_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, module_level)) = module_spec.split_once('=') {
                filter = filter.add_directive(parse_directive(module.trim(), module_level.trim())?);
            }
        }
    }

    Ok(filter)
}

fn parse_directive(
    module: &str,
    level: &str,
) -> Result<tracing_subscriber::filter::Directive, ProfileError> {
    format!("{}={}", module, level)
        .parse()
        .map_err(|e| ProfileError::LoggingError(format!("Invalid log directive: {}", e)))
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ProfileError> {
    if let Ok(format) = std::env::var("PROFILE_GATE_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ProfileError::LoggingError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<Output, ProfileError> {
    let output = match std::env::var("PROFILE_GATE_LOG_OUTPUT") {
        Ok(output) => output,
        Err(_) => config
            .map(|c| c.output.clone())
            .unwrap_or_else(default_output),
    };
    parse_output(&output).map_err(ProfileError::LoggingError)
}

fn parse_output(output: &str) -> Result<Output, String> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        )),
    }
}
