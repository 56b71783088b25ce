//! Algebraic properties of the change classifier over generated record sets.

use std::collections::BTreeSet;

use proptest::prelude::*;

use drg_compare::{Change, ChangeKind, ChangeSet, classify};
use drg_core::{DrgRecord, RecordSet};

// ============================================================================
// Generators
// ============================================================================

fn arb_record() -> impl Strategy<Value = DrgRecord> {
    let mdc = prop::sample::select(vec!["01", "04", "05", "08", "PRE", "--"]);
    let flags = prop::sample::select(vec![(true, false), (false, true), (false, false)]);
    let description = prop::sample::select(vec![
        "HEART TRANSPLANT W MCC",
        "HEADACHES W/O MCC",
        "HIP REPLACEMENT",
        "UNGROUPABLE",
    ]);

    (mdc, flags, description).prop_map(|(mdc, (is_medical, is_surgical), description)| DrgRecord {
        mdc: mdc.to_string(),
        is_medical,
        is_surgical,
        description: description.to_string(),
    })
}

fn arb_record_set() -> impl Strategy<Value = RecordSet> {
    prop::collection::btree_map("[0-9]{3}", arb_record(), 0..12)
        .prop_map(|records| records.into_iter().collect())
}

fn codes_of(changes: &ChangeSet, kind: ChangeKind) -> Vec<String> {
    changes.of_kind(kind).map(|change| change.code().to_string()).collect()
}

fn changed_fields(change: &Change) -> (&str, &DrgRecord, &DrgRecord) {
    match change {
        Change::MdcChanged { code, old, new }
        | Change::TypeChanged { code, old, new }
        | Change::DescriptionChanged { code, old, new } => (code, old, new),
        other => panic!("not a changed-record entry: {other:?}"),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    // Totality and mutual exclusivity: the classification is a partition of
    // the code union.
    #[test]
    fn test_every_code_is_classified_exactly_once(
        old in arb_record_set(),
        new in arb_record_set(),
    ) {
        let changes = classify(&old, &new);

        let union: BTreeSet<&str> = old.codes().chain(new.codes()).collect();
        prop_assert_eq!(changes.len(), union.len());

        let classified: BTreeSet<&str> = changes.iter().map(|c| c.code()).collect();
        prop_assert_eq!(classified, union);
    }

    // Comparing a set against itself leaves every code unchanged.
    #[test]
    fn test_self_comparison_is_all_unchanged(set in arb_record_set()) {
        let changes = classify(&set, &set);
        prop_assert_eq!(changes.len(), set.len());
        prop_assert!(changes.iter().all(|c| c.kind() == ChangeKind::Unchanged));
    }

    // Reversing the inputs swaps added and removed and leaves the other
    // categories' code lists intact.
    #[test]
    fn test_reversed_comparison_swaps_added_and_removed(
        old in arb_record_set(),
        new in arb_record_set(),
    ) {
        let forward = classify(&old, &new);
        let backward = classify(&new, &old);

        prop_assert_eq!(
            codes_of(&forward, ChangeKind::Added),
            codes_of(&backward, ChangeKind::Removed)
        );
        prop_assert_eq!(
            codes_of(&forward, ChangeKind::Removed),
            codes_of(&backward, ChangeKind::Added)
        );
        for kind in [
            ChangeKind::MdcChanged,
            ChangeKind::TypeChanged,
            ChangeKind::DescriptionChanged,
            ChangeKind::Unchanged,
        ] {
            prop_assert_eq!(codes_of(&forward, kind), codes_of(&backward, kind));
        }
    }

    // The three changed categories carry the same code pairs in either
    // direction, with the old and new records swapped.
    #[test]
    fn test_reversed_comparison_swaps_change_payloads(
        old in arb_record_set(),
        new in arb_record_set(),
    ) {
        let forward = classify(&old, &new);
        let backward = classify(&new, &old);

        for kind in [
            ChangeKind::MdcChanged,
            ChangeKind::TypeChanged,
            ChangeKind::DescriptionChanged,
        ] {
            let ahead: Vec<_> = forward.of_kind(kind).map(changed_fields).collect();
            let reversed: Vec<_> = backward.of_kind(kind).map(changed_fields).collect();
            prop_assert_eq!(ahead.len(), reversed.len());
            for ((f_code, f_old, f_new), (b_code, b_old, b_new)) in
                ahead.into_iter().zip(reversed)
            {
                prop_assert_eq!(f_code, b_code);
                prop_assert_eq!(f_old, b_new);
                prop_assert_eq!(f_new, b_old);
            }
        }
    }

    // A record classified as MDC-changed really differs in MDC, and one
    // classified below MDC never does: the precedence is observable.
    #[test]
    fn test_classification_respects_field_precedence(
        old in arb_record_set(),
        new in arb_record_set(),
    ) {
        let changes = classify(&old, &new);
        for change in changes.iter() {
            let code = change.code();
            let (Some(before), Some(after)) = (old.get(code), new.get(code)) else {
                continue;
            };
            match change.kind() {
                ChangeKind::MdcChanged => prop_assert!(before.mdc != after.mdc),
                ChangeKind::TypeChanged => {
                    prop_assert_eq!(&before.mdc, &after.mdc);
                    prop_assert!(
                        (before.is_medical, before.is_surgical)
                            != (after.is_medical, after.is_surgical)
                    );
                }
                ChangeKind::DescriptionChanged => {
                    prop_assert_eq!(&before.mdc, &after.mdc);
                    prop_assert_eq!(
                        (before.is_medical, before.is_surgical),
                        (after.is_medical, after.is_surgical)
                    );
                    prop_assert!(before.description != after.description);
                }
                ChangeKind::Unchanged => prop_assert_eq!(before, after),
                ChangeKind::Added | ChangeKind::Removed => {
                    prop_assert!(false, "present in both sets but classified {}", change.kind());
                }
            }
        }
    }
}
