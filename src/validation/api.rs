//! Provider / API profile checks.

use crate::profile::ApiProfile;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;

pub fn validate(api: &ApiProfile, result: &mut ValidationResult) {
    match api.api_type.to_ascii_lowercase().as_str() {
        "openai_compat" => {
            if api.base_url.is_none() {
                result.add_error(ValidationCode::MissingBaseUrl);
            }
            if api.model.is_none() {
                result.add_error(ValidationCode::MissingModel);
            }
        }
        "pool" => {
            let endpoints = api.endpoints.usable();
            if endpoints.is_empty() {
                result.add_error(ValidationCode::MissingPoolEndpoints);
            } else if endpoints.iter().any(|e| e.model.is_none()) {
                result.add_error(ValidationCode::MissingPoolModel);
            }
            if api.has_members {
                result.add_error(ValidationCode::PoolMembersUnsupported);
            }
        }
        _ => result.add_warning(ValidationCode::UnsupportedType(api.api_type.clone())),
    }

    if let Some(rpm) = &api.rpm {
        if !rpm.as_integer().map(|v| v >= 1).unwrap_or(false) {
            result.add_error(ValidationCode::InvalidRpm);
        }
    }

    if let Some(timeout) = &api.timeout {
        if !timeout.is_positive() {
            result.add_error(ValidationCode::InvalidTimeout);
        }
    }
}
