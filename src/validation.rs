//! Profile validation.
//!
//! Entry points take raw YAML, normalize a copy through `compat`, cross the
//! typed boundary, and run the per-kind checks. Pipelines additionally go
//! through the cross-validator, which needs a resolver for the profiles root.
//! Malformed input never produces an `Err`; it produces codes.

pub mod api;
pub mod chunk;
pub mod codes;
pub mod parser;
pub mod pipeline;
pub mod policy;
pub mod prompt;
pub mod result;

pub use codes::ValidationCode;
pub use result::ValidationResult;

use crate::error::ProfileError;
use crate::profile::{Header, ProfileData, ProfileKind};
use crate::resolver::ProfileResolver;
use crate::safety::is_safe_id;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Validates profiles against one profiles root
#[derive(Debug, Clone)]
pub struct ProfileValidator {
    resolver: ProfileResolver,
}

impl ProfileValidator {
    pub fn new(resolver: ProfileResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ProfileResolver {
        &self.resolver
    }

    /// Validate a raw payload as `kind`. The payload itself is not modified.
    pub fn validate(&self, kind: ProfileKind, data: &Value) -> ValidationResult {
        match normalized(kind, data) {
            Some(typed) => self.validate_data(&typed),
            None => ValidationResult::failure(ValidationCode::InvalidYaml),
        }
    }

    /// Validate an already-typed payload.
    pub fn validate_data(&self, data: &ProfileData) -> ValidationResult {
        check(data, Some(&self.resolver))
    }

    /// Pre-run gate: load the pipeline by id and run the full pipeline validation.
    pub fn validate_pipeline_run(&self, pipeline_id: &str) -> ValidationResult {
        match self.resolver.load(ProfileKind::Pipeline, pipeline_id) {
            Some(profile) => self.validate(ProfileKind::Pipeline, &Value::Mapping(profile.data)),
            None => ValidationResult::failure(ValidationCode::MissingReference {
                kind: ProfileKind::Pipeline,
                reference: pipeline_id.to_string(),
            }),
        }
    }
}

/// Validate one payload. Only pipelines read `profiles_dir`; other kinds
/// accept an empty one.
pub fn validate_profile_local(
    kind: ProfileKind,
    data: &Value,
    profiles_dir: &Path,
) -> Result<ValidationResult, ProfileError> {
    if kind == ProfileKind::Pipeline {
        let resolver = ProfileResolver::new(profiles_dir)?;
        return Ok(ProfileValidator::new(resolver).validate(kind, data));
    }
    Ok(match normalized(kind, data) {
        Some(typed) => check(&typed, None),
        None => ValidationResult::failure(ValidationCode::InvalidYaml),
    })
}

/// The gate to call immediately before starting a pipeline run.
pub fn validate_pipeline_run(
    profiles_dir: &Path,
    pipeline_id: &str,
) -> Result<ValidationResult, ProfileError> {
    let resolver = ProfileResolver::new(profiles_dir)?;
    Ok(ProfileValidator::new(resolver).validate_pipeline_run(pipeline_id))
}

/// Normalize a copy of `data` and cross the typed boundary; `None` for a
/// non-mapping payload.
fn normalized(kind: ProfileKind, data: &Value) -> Option<ProfileData> {
    let Value::Mapping(map) = data else {
        return None;
    };
    let mut map = map.clone();
    crate::compat::normalize(kind, &mut map);
    Some(ProfileData::parse(kind, &map))
}

/// Header and per-kind checks. Pipeline cross-validation runs only when a
/// resolver is supplied.
fn check(data: &ProfileData, resolver: Option<&ProfileResolver>) -> ValidationResult {
    let mut result = ValidationResult::new();
    check_header(data.header(), &mut result);

    match data {
        ProfileData::Api(api) => api::validate(api, &mut result),
        ProfileData::Prompt(p) => prompt::validate(p, &mut result),
        ProfileData::Parser(p) => parser::validate(p, &mut result),
        ProfileData::Policy(p) => policy::validate(p, &mut result),
        ProfileData::Chunk(c) => chunk::validate(c, &mut result),
        ProfileData::Pipeline(p) => {
            if let Some(resolver) = resolver {
                pipeline::validate(p, resolver, &mut result)
            }
        }
    }

    debug!(
        kind = %data.kind(),
        id = data.header().id.as_deref().unwrap_or(""),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated profile"
    );
    result
}

fn check_header(header: &Header, result: &mut ValidationResult) {
    match header.id.as_deref() {
        None => result.add_error(ValidationCode::MissingId),
        Some(id) if !is_safe_id(id) => result.add_error(ValidationCode::InvalidId),
        Some(_) => {}
    }
}
