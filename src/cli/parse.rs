//! CLI parse: clap types for profile-gate. No behavior; definitions only.

use crate::profile::ProfileKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// profile-gate - validation and referential-integrity checks for pipeline profiles
#[derive(Parser, Debug)]
#[command(name = "profile-gate")]
#[command(about = "Validate YAML pipeline profiles before a run")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (workspace config is read from <workspace>/config)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Profiles root (overrides profiles.dir from configuration)
    #[arg(long)]
    pub profiles_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a single profile file
    Validate {
        /// Profile kind (api, prompt, parser, policy, chunk, pipeline)
        kind: ProfileKind,
        /// YAML file to validate
        file: PathBuf,
    },
    /// Pre-run gate: validate a pipeline and everything it references
    Check {
        /// Pipeline id, file name, or path inside the profiles root
        pipeline: String,
    },
    /// Resolve a reference to a profile file
    Resolve {
        kind: ProfileKind,
        /// Id, file name, or path inside the profiles root
        reference: String,
    },
    /// List profiles of one kind
    List { kind: ProfileKind },
    /// Print a profile in canonical form (the file is never rewritten)
    Normalize { kind: ProfileKind, file: PathBuf },
    /// Validate every profile under the profiles root
    Audit,
    /// Show the legacy field migration table
    Migrations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
