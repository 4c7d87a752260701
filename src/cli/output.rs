//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ProfileError;

/// Exit code for a completed command whose verdict is negative.
pub const EXIT_REJECTED: i32 = 1;
/// Exit code for configuration, I/O, and usage failures.
pub const EXIT_FAILURE: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ProfileError) -> String {
    match e {
        ProfileError::NotFound { kind, reference } => {
            format!("No {} profile matches '{}'", kind, reference)
        }
        other => other.to_string(),
    }
}

/// Process exit code for an error.
pub fn exit_code(e: &ProfileError) -> i32 {
    match e {
        ProfileError::NotFound { .. } => EXIT_REJECTED,
        _ => EXIT_FAILURE,
    }
}
