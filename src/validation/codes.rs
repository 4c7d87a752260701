//! Validation codes.
//!
//! Codes are opaque strings for presentation layers to localize. Grammar:
//! a bare token (`missing_id`), a token with one argument
//! (`unsupported_type:<value>`), or a token with two (`missing_reference:<kind>:<id>`).

use crate::profile::ProfileKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationCode {
    // Structural
    InvalidYaml,
    MissingId,
    InvalidId,
    MissingField(&'static str),

    // Advisory
    UnsupportedType(String),

    // Referential
    MissingReference { kind: ProfileKind, reference: String },

    // Provider
    MissingBaseUrl,
    MissingModel,
    MissingPoolEndpoints,
    MissingPoolModel,
    PoolMembersUnsupported,
    InvalidRpm,
    InvalidTimeout,

    // Prompt
    PromptMissingSource,

    // Parser
    MissingPattern,
    MissingJsonPath,
    MissingAnyParsers,
    MissingScript,

    // Line policy
    InvalidSimilarityThreshold,

    // Chunk policy
    InvalidTargetChars,
    InvalidMaxChars,
    InvalidBalanceThreshold,
    InvalidBalanceCount,

    // Consistency
    LinePolicyRequiresLineChunk,
    LineChunkMissingLinePolicy,
    ParserRequiresTaggedPrompt,
    ParserRequiresJsonPrompt,
    ParserRequiresJsonlPrompt,
}

impl ValidationCode {
    fn token(&self) -> &'static str {
        match self {
            ValidationCode::InvalidYaml => "invalid_yaml",
            ValidationCode::MissingId => "missing_id",
            ValidationCode::InvalidId => "invalid_id",
            ValidationCode::MissingField(_) => "missing_field",
            ValidationCode::UnsupportedType(_) => "unsupported_type",
            ValidationCode::MissingReference { .. } => "missing_reference",
            ValidationCode::MissingBaseUrl => "missing_base_url",
            ValidationCode::MissingModel => "missing_model",
            ValidationCode::MissingPoolEndpoints => "missing_pool_endpoints",
            ValidationCode::MissingPoolModel => "missing_pool_model",
            ValidationCode::PoolMembersUnsupported => "pool_members_unsupported",
            ValidationCode::InvalidRpm => "invalid_rpm",
            ValidationCode::InvalidTimeout => "invalid_timeout",
            ValidationCode::PromptMissingSource => "prompt_missing_source",
            ValidationCode::MissingPattern => "missing_pattern",
            ValidationCode::MissingJsonPath => "missing_json_path",
            ValidationCode::MissingAnyParsers => "missing_any_parsers",
            ValidationCode::MissingScript => "missing_script",
            ValidationCode::InvalidSimilarityThreshold => "invalid_similarity_threshold",
            ValidationCode::InvalidTargetChars => "invalid_target_chars",
            ValidationCode::InvalidMaxChars => "invalid_max_chars",
            ValidationCode::InvalidBalanceThreshold => "invalid_balance_threshold",
            ValidationCode::InvalidBalanceCount => "invalid_balance_count",
            ValidationCode::LinePolicyRequiresLineChunk => "line_policy_requires_line_chunk",
            ValidationCode::LineChunkMissingLinePolicy => "line_chunk_missing_line_policy",
            ValidationCode::ParserRequiresTaggedPrompt => "parser_requires_tagged_prompt",
            ValidationCode::ParserRequiresJsonPrompt => "parser_requires_json_prompt",
            ValidationCode::ParserRequiresJsonlPrompt => "parser_requires_jsonl_prompt",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::MissingField(field) => write!(f, "{}:{}", self.token(), field),
            ValidationCode::UnsupportedType(value) => write!(f, "{}:{}", self.token(), value),
            ValidationCode::MissingReference { kind, reference } => {
                write!(f, "{}:{}:{}", self.token(), kind, reference)
            }
            _ => f.write_str(self.token()),
        }
    }
}
