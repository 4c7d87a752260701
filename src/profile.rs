//! Profile model: kinds, loaded profiles, and the typed parse boundary.
//!
//! Profiles are authored externally as one YAML mapping per file under
//! `{profiles_dir}/{kind}/`. Raw YAML stays a `serde_yaml::Mapping` until it
//! crosses `ProfileData::parse`, after which validators only see typed variants.

pub mod data;
pub mod kind;
pub mod value;

pub use data::{
    ApiProfile, ChunkProfile, ChunkType, Endpoint, Endpoints, Header, ParserProfile,
    PipelineProfile, PolicyProfile, ProfileData, PromptProfile,
};
pub use kind::ProfileKind;
pub use value::NumericInput;

use serde::Serialize;
use serde_yaml::Mapping;
use std::path::PathBuf;

/// A profile loaded from disk
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub kind: ProfileKind,
    pub path: PathBuf,
    pub data: Mapping,
}

impl Profile {
    /// Normalize a copy of the raw data and parse it into its typed variant.
    pub fn typed(&self) -> ProfileData {
        let mut data = self.data.clone();
        crate::compat::normalize(self.kind, &mut data);
        ProfileData::parse(self.kind, &data)
    }
}

/// Listing row for a profile file
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}
