//! Line policy checks.

use crate::profile::PolicyProfile;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;

/// Policy types with first-class support
pub const SUPPORTED_POLICY_TYPES: [&str; 2] = ["strict", "tolerant"];

pub fn validate(policy: &PolicyProfile, result: &mut ValidationResult) {
    match &policy.policy_type {
        None => result.add_error(ValidationCode::MissingField("type")),
        Some(policy_type) => {
            let slug = policy_type.to_ascii_lowercase();
            if !SUPPORTED_POLICY_TYPES.contains(&slug.as_str()) {
                result.add_warning(ValidationCode::UnsupportedType(policy_type.clone()));
            }
        }
    }

    if let Some(threshold) = &policy.similarity_threshold {
        if !threshold.is_unit_fraction() {
            result.add_error(ValidationCode::InvalidSimilarityThreshold);
        }
    }
}
