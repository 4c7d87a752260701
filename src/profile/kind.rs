//! Profile kinds and their directory names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of profile kinds; each kind owns one sub-directory of the profiles root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Provider / API endpoint settings
    Api,
    /// Prompt templates
    Prompt,
    /// Model output parsers
    Parser,
    /// Line policies
    Policy,
    /// Chunk policies
    Chunk,
    /// Pipelines tying the other kinds together
    Pipeline,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 6] = [
        ProfileKind::Api,
        ProfileKind::Prompt,
        ProfileKind::Parser,
        ProfileKind::Policy,
        ProfileKind::Chunk,
        ProfileKind::Pipeline,
    ];

    /// Directory name under the profiles root, also used in reference codes.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Api => "api",
            ProfileKind::Prompt => "prompt",
            ProfileKind::Parser => "parser",
            ProfileKind::Policy => "policy",
            ProfileKind::Chunk => "chunk",
            ProfileKind::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(ProfileKind::Api),
            "prompt" => Ok(ProfileKind::Prompt),
            "parser" => Ok(ProfileKind::Parser),
            "policy" => Ok(ProfileKind::Policy),
            "chunk" => Ok(ProfileKind::Chunk),
            "pipeline" => Ok(ProfileKind::Pipeline),
            other => Err(format!(
                "Invalid profile kind: {}. Must be api, prompt, parser, policy, chunk, or pipeline",
                other
            )),
        }
    }
}
