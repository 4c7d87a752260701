//! Property-based tests for the safety layer and the normalizer

mod safe_id;
