//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_REJECTED};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_audit_json, format_audit_text, format_list_json, format_list_text,
    format_migrations_json, format_migrations_text, format_normalized_json,
    format_normalized_text, format_resolved_json, format_resolved_text, format_validation_json,
    format_validation_text,
};
pub use route::{CommandOutcome, RunContext};
