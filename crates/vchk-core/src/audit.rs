#![forbid(unsafe_code)]

//! Cross-verification aliasing audit.
//!
//! Upstream producers may deduplicate value-identical checks so that
//! several verifications hold the same `Arc<Check>`. That sharing is safe
//! because checks are immutable, but it is exactly the shape that breaks a
//! naive "clone the tree, patch the clone" update. This module makes the
//! sharing visible ([`shared_checks`]) and can reproduce it on demand
//! ([`dedup_identical_checks`]).

use std::sync::Arc;

use ahash::AHashMap;

use crate::model::{Check, Checklist, Verification};

/// Two positions in different verifications that hold the same `Arc<Check>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedCheck {
    pub first: (usize, usize),
    pub second: (usize, usize),
}

/// Every pair of positions in *different* verifications that hold the same
/// check allocation, ordered by first position then second.
#[must_use]
pub fn shared_checks(checklist: &Checklist) -> Vec<SharedCheck> {
    let mut by_ptr: AHashMap<*const Check, Vec<(usize, usize)>> = AHashMap::new();
    let mut order: Vec<*const Check> = Vec::new();

    for (vi, verification) in checklist.iter().enumerate() {
        for (ci, check) in verification.checks().iter().enumerate() {
            let ptr = Arc::as_ptr(check);
            by_ptr
                .entry(ptr)
                .or_insert_with(|| {
                    order.push(ptr);
                    Vec::new()
                })
                .push((vi, ci));
        }
    }

    let mut pairs = Vec::new();
    for ptr in order {
        let Some(positions) = by_ptr.get(&ptr) else {
            continue;
        };
        for (i, &first) in positions.iter().enumerate() {
            for &second in &positions[i + 1..] {
                if first.0 != second.0 {
                    pairs.push(SharedCheck { first, second });
                }
            }
        }
    }
    pairs
}

/// Rebuild `checklist` so that value-identical checks share one allocation
/// across verifications, the way a deduplicating producer would emit them.
///
/// Verifications with no shareable check are reused as-is.
#[must_use]
pub fn dedup_identical_checks(checklist: &Checklist) -> Checklist {
    let mut canonical: AHashMap<Check, Arc<Check>> = AHashMap::new();

    let verifications = checklist.iter().map(|verification| {
        let mut changed = false;
        let checks: Vec<Arc<Check>> = verification
            .checks()
            .iter()
            .map(|check| {
                let shared = canonical
                    .entry(Check::clone(check))
                    .or_insert_with(|| Arc::clone(check));
                if !Arc::ptr_eq(shared, check) {
                    changed = true;
                }
                Arc::clone(shared)
            })
            .collect();
        if changed {
            Arc::new(Verification::from_shared(verification.source.clone(), checks))
        } else {
            Arc::clone(verification)
        }
    });

    let out = Checklist::from_shared(verifications.collect::<Vec<_>>());
    tracing::debug!(
        message = "checklist.dedup",
        shared_pairs = shared_checks(&out).len(),
    );
    out
}
