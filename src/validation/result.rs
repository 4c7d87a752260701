//! Aggregated validation outcome.

use crate::validation::codes::ValidationCode;
use serde::{Deserialize, Serialize};

/// Result of validating one profile. Runnable iff `errors` is empty;
/// warnings never block a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A result carrying exactly one error.
    pub fn failure(code: ValidationCode) -> Self {
        let mut result = Self::new();
        result.add_error(code);
        result
    }

    pub fn add_error(&mut self, code: ValidationCode) {
        self.errors.push(code.to_string());
        self.ok = false;
    }

    pub fn add_warning(&mut self, code: ValidationCode) {
        self.warnings.push(code.to_string());
    }

    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e == code)
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w == code)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}
