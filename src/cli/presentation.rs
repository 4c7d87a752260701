//! CLI presentation: text and json formatters per command family.

mod audit;
mod profiles;
mod validation;

pub use audit::{format_audit_json, format_audit_text};
pub use profiles::{
    format_list_json, format_list_text, format_migrations_json, format_migrations_text,
    format_normalized_json, format_normalized_text, format_resolved_json, format_resolved_text,
};
pub use validation::{format_validation_json, format_validation_text};

use owo_colors::OwoColorize;
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Verdict word, colored when writing to a terminal.
fn verdict(ok: bool, color: bool) -> String {
    match (ok, color) {
        (true, true) => format!("{}", "ok".green().bold()),
        (true, false) => "ok".to_string(),
        (false, true) => format!("{}", "invalid".red().bold()),
        (false, false) => "invalid".to_string(),
    }
}

fn error_label(color: bool) -> String {
    if color {
        format!("{}", "error".red())
    } else {
        "error".to_string()
    }
}

fn warning_label(color: bool) -> String {
    if color {
        format!("{}", "warning".yellow())
    } else {
        "warning".to_string()
    }
}
