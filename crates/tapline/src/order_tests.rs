// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::tap::{TapCallback, TapOptions};
use proptest::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    stage: i32,
    seq: usize,
}

impl Placed for Entry {
    fn name(&self) -> &str {
        &self.name
    }

    fn stage(&self) -> i32 {
        self.stage
    }
}

struct Reg {
    name: &'static str,
    stage: i32,
    before: Vec<String>,
}

fn tap(name: &'static str, stage: i32) -> Reg {
    ahead(name, stage, &[])
}

fn ahead(name: &'static str, stage: i32, before: &[&str]) -> Reg {
    Reg {
        name,
        stage,
        before: before.iter().map(|s| s.to_string()).collect(),
    }
}

/// Register in order and return the resolved names.
fn resolve(registrations: Vec<Reg>) -> Vec<String> {
    let mut entries: Vec<Entry> = Vec::new();
    for (seq, reg) in registrations.into_iter().enumerate() {
        let index = insertion_index(&entries, reg.stage, &reg.before);
        entries.insert(
            index,
            Entry {
                name: reg.name.to_string(),
                stage: reg.stage,
                seq,
            },
        );
    }
    entries.into_iter().map(|e| e.name).collect()
}

#[test]
fn test_empty_sequence_inserts_at_zero() {
    let entries: Vec<Entry> = Vec::new();
    assert_eq!(insertion_index(&entries, 7, &[]), 0);
}

#[test]
fn test_before_places_ahead_of_target() {
    assert_eq!(resolve(vec![tap("B", 0), ahead("A", 0, &["B"])]), ["A", "B"]);
}

#[test]
fn test_lower_stage_moves_ahead() {
    assert_eq!(resolve(vec![tap("A", 0), tap("B", -5)]), ["B", "A"]);
}

#[rstest]
#[case::equal_stages_keep_registration_order(
    vec![tap("A", 0), tap("B", 0), tap("C", 0)],
    &["A", "B", "C"]
)]
#[case::middle_stage(
    vec![tap("A", 10), tap("B", 0), tap("C", 5)],
    &["B", "C", "A"]
)]
#[case::tie_lands_after_existing_equal_stage(
    vec![tap("A", 1), tap("B", 2), tap("C", 1)],
    &["A", "C", "B"]
)]
#[case::before_dominates_stage(
    vec![tap("A", -10), ahead("B", 10, &["A"])],
    &["B", "A"]
)]
#[case::multiple_targets(
    vec![tap("A", 0), tap("B", 0), tap("C", 0), ahead("D", 0, &["A", "C"])],
    &["D", "A", "B", "C"]
)]
#[case::stage_applies_after_targets_resolved(
    vec![tap("A", -1), tap("B", 5), ahead("C", 0, &["B"])],
    &["A", "C", "B"]
)]
#[case::pending_target_scans_past_unrelated_taps(
    vec![tap("A", 3), tap("B", 0), ahead("C", 1, &["B"])],
    &["C", "B", "A"]
)]
fn resolves_order(#[case] registrations: Vec<Reg>, #[case] expected: &[&str]) {
    assert_eq!(resolve(registrations), expected);
}

#[test]
fn test_before_is_not_retroactive() {
    // "B" is registered after "A" asked to precede it.
    assert_eq!(resolve(vec![ahead("A", 0, &["B"]), tap("B", 0)]), ["A", "B"]);
    assert_eq!(
        resolve(vec![tap("X", 0), ahead("A", 0, &["B"]), tap("B", -1)]),
        ["B", "A", "X"]
    );
}

#[test]
fn test_unresolved_before_target_scans_to_front() {
    // A target that is never found keeps the pending set non-empty for the
    // whole scan, so the tap lands at the front. No error is raised.
    assert_eq!(
        resolve(vec![tap("A", 0), tap("B", 0), ahead("C", 0, &["missing"])]),
        ["C", "A", "B"]
    );
    assert_eq!(
        resolve(vec![tap("A", -5), ahead("C", 5, &["missing"])]),
        ["C", "A"]
    );
}

#[test]
fn test_duplicate_target_name_matches_last_occurrence() {
    assert_eq!(
        resolve(vec![tap("B", 0), tap("X", 0), tap("B", 0), ahead("N", 0, &["B"])]),
        ["B", "X", "N", "B"]
    );
}

#[test]
fn test_insert_returns_index_for_descriptors() {
    let mut taps = Vec::new();
    let make = |options: TapOptions| {
        options
            .into_descriptor(TapCallback::sync(|_: &()| Ok(())))
            .unwrap()
    };

    assert_eq!(insert(&mut taps, make(TapOptions::new("A"))), 0);
    assert_eq!(insert(&mut taps, make(TapOptions::new("B").with_stage(-1))), 0);
    assert_eq!(insert(&mut taps, make(TapOptions::new("C").with_before("A"))), 1);

    let names: Vec<&str> = taps.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["B", "C", "A"]);
}

proptest! {
    #[test]
    fn stages_resolve_non_decreasing_with_stable_ties(
        stages in proptest::collection::vec(-5i32..5, 0..40),
    ) {
        let mut entries: Vec<Entry> = Vec::new();
        for (seq, stage) in stages.iter().enumerate() {
            let index = insertion_index(&entries, *stage, &[]);
            entries.insert(index, Entry { name: format!("t{seq}"), stage: *stage, seq });
        }

        prop_assert_eq!(entries.len(), stages.len());
        for pair in entries.windows(2) {
            prop_assert!(pair[0].stage <= pair[1].stage);
            if pair[0].stage == pair[1].stage {
                prop_assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    #[test]
    fn increasing_stages_keep_registration_order(start in -100i32..100, count in 0usize..30) {
        let registrations: Vec<(String, i32)> = (0..count)
            .map(|i| (format!("t{i}"), start + i as i32))
            .collect();
        let mut entries: Vec<Entry> = Vec::new();
        for (seq, (name, stage)) in registrations.iter().enumerate() {
            let index = insertion_index(&entries, *stage, &[]);
            prop_assert_eq!(index, entries.len());
            entries.insert(index, Entry { name: name.clone(), stage: *stage, seq });
        }
    }

    #[test]
    fn before_target_always_follows_new_tap(
        stages in proptest::collection::vec(-3i32..3, 1..20),
        pick in any::<prop::sample::Index>(),
        stage in -3i32..3,
    ) {
        let mut entries: Vec<Entry> = Vec::new();
        for (seq, s) in stages.iter().enumerate() {
            let index = insertion_index(&entries, *s, &[]);
            entries.insert(index, Entry { name: format!("t{seq}"), stage: *s, seq });
        }
        let target = entries[pick.index(entries.len())].name.clone();
        let index = insertion_index(&entries, stage, std::slice::from_ref(&target));
        let target_pos = entries.iter().position(|e| e.name == target).unwrap();
        prop_assert!(index <= target_pos);
    }
}
