//! Prompt profile checks.

use crate::profile::PromptProfile;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;

pub fn validate(prompt: &PromptProfile, result: &mut ValidationResult) {
    if prompt.missing_source_placeholder() {
        result.add_error(ValidationCode::PromptMissingSource);
    }
}
