//! Property-based tests for bom-ref discrimination.
//!
//! The discriminator's contract is invariant-shaped: after `discriminate()`
//! every distinct handle holds a non-null, pairwise-distinct value, and
//! after `reset()` every handle holds exactly its original value. Both are
//! exercised over arbitrary value lists, including duplicated handles and
//! duplicated values.

use cyclonedx_render::{BomRef, BomRefDiscriminator};
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = Option<String>> {
    // Short alphabets force plenty of value collisions.
    prop::option::of("[ab]{0,2}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn discriminated_values_are_nonnull_and_pairwise_distinct(
        values in prop::collection::vec(value_strategy(), 1..24),
        duplicates in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let handles: Vec<BomRef> = values.iter().cloned().map(BomRef::new).collect();

        // Feed some handles in twice: identity dedup must treat them as one.
        let mut input = handles.clone();
        for idx in &duplicates {
            input.push(handles[idx.index(handles.len())].clone());
        }

        let mut disc = BomRefDiscriminator::from_refs(input);
        prop_assert_eq!(disc.len(), handles.len(), "duplicate handles collapse");

        disc.discriminate();

        let mut seen = std::collections::HashSet::new();
        for handle in &handles {
            let value = handle.value();
            prop_assert!(value.is_some(), "every handle gets a value");
            prop_assert!(
                seen.insert(value.clone()),
                "value {:?} assigned twice",
                value
            );
        }
    }

    #[test]
    fn reset_restores_the_exact_snapshot(
        values in prop::collection::vec(value_strategy(), 1..24),
    ) {
        let handles: Vec<BomRef> = values.iter().cloned().map(BomRef::new).collect();
        let snapshot: Vec<Option<String>> = handles.iter().map(BomRef::value).collect();

        let mut disc = BomRefDiscriminator::from_refs(handles.iter().cloned());
        disc.discriminate();
        disc.reset();

        let restored: Vec<Option<String>> = handles.iter().map(BomRef::value).collect();
        prop_assert_eq!(restored, snapshot);
    }

    #[test]
    fn restoration_also_runs_on_error_paths(
        values in prop::collection::vec(value_strategy(), 1..24),
    ) {
        let handles: Vec<BomRef> = values.iter().cloned().map(BomRef::new).collect();
        let snapshot: Vec<Option<String>> = handles.iter().map(BomRef::value).collect();

        let result: Result<(), ()> = (|| {
            let mut disc = BomRefDiscriminator::from_refs(handles.iter().cloned());
            disc.discriminate();
            Err(())
        })();
        prop_assert!(result.is_err());

        let restored: Vec<Option<String>> = handles.iter().map(BomRef::value).collect();
        prop_assert_eq!(restored, snapshot, "drop restored the snapshot");
    }

    #[test]
    fn already_unique_values_are_left_untouched(count in 1usize..24) {
        let handles: Vec<BomRef> = (0..count)
            .map(|i| BomRef::with_value(format!("unique-{i}")))
            .collect();

        let mut disc = BomRefDiscriminator::from_refs(handles.iter().cloned());
        disc.discriminate();

        for (i, handle) in handles.iter().enumerate() {
            prop_assert_eq!(handle.value(), Some(format!("unique-{i}")));
        }
    }
}
