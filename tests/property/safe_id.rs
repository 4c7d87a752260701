//! Property-based tests for the safe-id grammar

use profile_gate::safety::{is_path_within, is_safe_filename, is_safe_id};
use proptest::prelude::*;
use std::path::Path;

/// Every id drawn from the grammar is accepted unless it contains `..`
#[test]
fn test_grammar_ids_are_safe() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[A-Za-z0-9_][A-Za-z0-9_.-]{0,40}", |id| {
            prop_assert_eq!(is_safe_id(&id), !id.contains(".."));
            Ok(())
        })
        .unwrap();
}

/// Separators and traversal are rejected wherever they appear
#[test]
fn test_separators_and_traversal_are_unsafe() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                "[A-Za-z0-9_]{0,10}",
                prop_oneof![Just("/"), Just("\\"), Just("..")],
                "[A-Za-z0-9_.-]{0,10}",
            ),
            |(head, bad, tail)| {
                let id = format!("{}{}{}", head, bad, tail);
                prop_assert!(!is_safe_id(&id));
                let filename = format!("{}.yaml", id);
                prop_assert!(!is_safe_filename(&filename));
                Ok(())
            },
        )
        .unwrap();
}

/// A leading character outside `[A-Za-z0-9_]` is rejected
#[test]
fn test_disallowed_first_character() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[.\\-~$ @#]", "[A-Za-z0-9_]{0,10}"),
            |(first, rest)| {
                let id = format!("{}{}", first, rest);
                prop_assume!(!id.trim().is_empty());
                let trimmed = id.trim();
                prop_assume!(!trimmed
                    .chars()
                    .next()
                    .map(|c| c.is_ascii_alphanumeric() || c == '_')
                    .unwrap_or(false));
                prop_assert!(!is_safe_id(&id));
                Ok(())
            },
        )
        .unwrap();
}

/// Joining a safe id under a base never leaves the base
#[test]
fn test_safe_ids_stay_inside_base() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let base = Path::new("/profiles/api");

    runner
        .run(&"[A-Za-z0-9_][A-Za-z0-9_.-]{0,20}", |id| {
            prop_assume!(is_safe_id(&id));
            let candidate = base.join(format!("{}.yaml", id));
            prop_assert!(is_path_within(base, &candidate));
            Ok(())
        })
        .unwrap();
}
