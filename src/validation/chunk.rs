//! Chunk policy checks.

use crate::profile::ChunkProfile;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;

pub fn validate(chunk: &ChunkProfile, result: &mut ValidationResult) {
    match &chunk.raw_type {
        None => result.add_error(ValidationCode::MissingField("chunk_type")),
        Some(raw) if chunk.chunk_type().is_none() => {
            result.add_warning(ValidationCode::UnsupportedType(raw.clone()))
        }
        Some(_) => {}
    }

    if let Some(target) = &chunk.target_chars {
        if !target.is_positive() {
            result.add_error(ValidationCode::InvalidTargetChars);
        }
    }

    if let Some(max) = &chunk.max_chars {
        let below_target = match (
            max.as_finite(),
            chunk.target_chars.as_ref().and_then(|t| t.as_finite()),
        ) {
            (Some(max), Some(target)) => max < target,
            _ => false,
        };
        if !max.is_positive() || below_target {
            result.add_error(ValidationCode::InvalidMaxChars);
        }
    }

    if let Some(threshold) = &chunk.balance_threshold {
        if !threshold.is_unit_fraction() {
            result.add_error(ValidationCode::InvalidBalanceThreshold);
        }
    }

    if let Some(count) = &chunk.balance_count {
        if !count.as_integer().map(|v| v >= 1).unwrap_or(false) {
            result.add_error(ValidationCode::InvalidBalanceCount);
        }
    }
}
