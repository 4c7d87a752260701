//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log fields (e.g. "validate", "check").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Validate { .. } => "validate",
        Commands::Check { .. } => "check",
        Commands::Resolve { .. } => "resolve",
        Commands::List { .. } => "list",
        Commands::Normalize { .. } => "normalize",
        Commands::Audit => "audit",
        Commands::Migrations => "migrations",
    }
}
