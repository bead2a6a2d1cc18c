// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Placement of new taps into a resolved sequence.
//!
//! The sequence is scanned from the end toward the start. While any `before`
//! target is still pending the scan keeps moving, removing targets as they are
//! passed. Once none remain, the scan only moves past taps with a strictly
//! greater stage. The new tap lands right after the position where the scan
//! stops, so equal stages keep registration order.
//!
//! `before` targets are only matched against taps already present. A target
//! that is never found keeps the scan going to the front, so the new tap is
//! placed first. No error is raised.

use crate::tap::TapDescriptor;
use std::collections::HashSet;

/// Anything that can be ordered by name and stage.
pub trait Placed {
    fn name(&self) -> &str;
    fn stage(&self) -> i32;
}

impl<A> Placed for TapDescriptor<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn stage(&self) -> i32 {
        self.stage
    }
}

/// Compute the index at which a tap with `stage` and `before` belongs.
pub fn insertion_index<T: Placed>(taps: &[T], stage: i32, before: &[String]) -> usize {
    let mut pending: HashSet<&str> = before.iter().map(String::as_str).collect();
    let mut index = taps.len();

    while index > 0 {
        let current = &taps[index - 1];
        if !pending.is_empty() {
            // Matched or not, a pending target keeps the scan moving.
            pending.remove(current.name());
            index -= 1;
            continue;
        }
        if current.stage() > stage {
            index -= 1;
            continue;
        }
        break;
    }

    index
}

/// Insert `tap` at its resolved position and return that position.
pub fn insert<A>(taps: &mut Vec<TapDescriptor<A>>, tap: TapDescriptor<A>) -> usize {
    let index = insertion_index(taps, tap.stage, &tap.before);
    taps.insert(index, tap);
    index
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
