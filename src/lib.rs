//! profile-gate: validation and referential integrity for pipeline profiles
//!
//! Pipelines are assembled from YAML profiles of six kinds (api, prompt,
//! parser, policy, chunk, pipeline) stored under one profiles root. This crate
//! resolves references between them safely, folds legacy field shapes into
//! canonical form, and reports problems as stable string codes so a run can be
//! refused before it starts.

pub mod audit;
pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod profile;
pub mod resolver;
pub mod safety;
pub mod validation;

pub use error::ProfileError;
pub use profile::{Profile, ProfileKind};
pub use resolver::ProfileResolver;
pub use validation::{
    validate_pipeline_run, validate_profile_local, ProfileValidator, ValidationCode,
    ValidationResult,
};
