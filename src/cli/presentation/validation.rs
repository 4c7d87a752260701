//! Validation verdict presentation.

use super::{error_label, to_json, verdict, warning_label};
use crate::validation::ValidationResult;

/// One verdict line followed by an indented line per error and warning.
pub fn format_validation_text(subject: &str, result: &ValidationResult, color: bool) -> String {
    let mut output = format!("{}: {}\n", subject, verdict(result.ok, color));
    for code in &result.errors {
        output.push_str(&format!("  {:<8} {}\n", error_label(color), code));
    }
    for code in &result.warnings {
        output.push_str(&format!("  {:<8} {}\n", warning_label(color), code));
    }
    output
}

pub fn format_validation_json(result: &ValidationResult) -> String {
    to_json(result)
}
