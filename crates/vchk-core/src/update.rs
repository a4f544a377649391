#![forbid(unsafe_code)]

//! Copy-on-write update engine.
//!
//! Every operation here takes a [`Checklist`] by reference and returns a new
//! one. The new checklist is rebuilt level by level along the path from the
//! root to the toggled check only:
//!
//! ```text
//! Vec<Arc<Verification>>   map: reuse every Arc except position v
//!   Verification           new: same source, new Eligibility
//!     Vec<Arc<Check>>      map: reuse every Arc except position c
//!       Check              new: same name/label, new passed
//! ```
//!
//! # Invariants
//!
//! 1. Output length equals input length, at both list levels.
//! 2. For `v' != v`, `Arc::ptr_eq(&out[v'], &in[v'])`.
//! 3. For `c' != c` inside the updated verification, the check `Arc` is
//!    reused from the input.
//! 4. The check at `(v, c)` is a fresh allocation. It is never shared with
//!    any other verification of the output, even when the input check it
//!    replaces was shared.
//! 5. The input is never touched.
//!
//! # Failure Modes
//!
//! - **Whole-tree clone**: cloning the input wholesale and patching the copy
//!   keeps any cross-verification sharing of `Arc<Check>`. Patching through
//!   such a copy (for example via a `RefCell` inside the check) would leak
//!   the edit into a sibling verification. This module never clones the
//!   tree; it only allocates the nodes on the edited path.
//! - **Invalid index**: indices are a caller precondition. The panicking
//!   entry point fails fast; [`try_set_check_passed`] reports the error as
//!   a value.

use std::sync::Arc;

use crate::error::{ChecklistError, Result};
use crate::model::{Checklist, Eligibility, Verification};

/// Set `passed` of the check at `(verification_index, check_index)`.
///
/// # Panics
///
/// Panics if either index is out of range. Indices are expected to come
/// from iterating `checklist` itself, so a bad index is an integration bug
/// in the caller and is surfaced immediately.
#[must_use]
pub fn set_check_passed(
    checklist: &Checklist,
    verification_index: usize,
    check_index: usize,
    new_value: bool,
) -> Checklist {
    match try_set_check_passed(checklist, verification_index, check_index, new_value) {
        Ok(next) => next,
        Err(err) => panic!("set_check_passed: {err}"),
    }
}

/// Fallible form of [`set_check_passed`].
///
/// # Errors
///
/// Returns [`ChecklistError::InvalidIndex`] when either index is out of
/// range. The input is untouched in that case.
pub fn try_set_check_passed(
    checklist: &Checklist,
    verification_index: usize,
    check_index: usize,
    new_value: bool,
) -> Result<Checklist> {
    // Validates both indices before any allocation.
    let old = checklist.check(verification_index, check_index)?;

    tracing::trace!(
        message = "checklist.update",
        source = %checklist.as_slice()[verification_index].source,
        check = %old.name,
        verification_index,
        check_index,
        from = old.passed,
        to = new_value,
    );

    let verifications = checklist
        .iter()
        .enumerate()
        .map(|(vi, verification)| {
            if vi == verification_index {
                Arc::new(rebuild_verification(verification, check_index, new_value))
            } else {
                Arc::clone(verification)
            }
        })
        .collect::<Vec<_>>();

    Ok(Checklist::from_shared(verifications))
}

/// Flip the check at `(verification_index, check_index)`.
///
/// # Panics
///
/// Same precondition as [`set_check_passed`].
#[must_use]
pub fn toggle_check(
    checklist: &Checklist,
    verification_index: usize,
    check_index: usize,
) -> Checklist {
    match checklist.check(verification_index, check_index) {
        Ok(check) => set_check_passed(checklist, verification_index, check_index, !check.passed),
        Err(err) => panic!("toggle_check: {err}"),
    }
}

/// Set `passed` of the check identified by `(source, name)`.
///
/// # Errors
///
/// Returns [`ChecklistError::UnknownCheck`] when no verification with that
/// source holds a check with that name.
pub fn set_check_passed_by_key(
    checklist: &Checklist,
    source: &str,
    name: &str,
    new_value: bool,
) -> Result<Checklist> {
    let (vi, ci) = checklist
        .position_of(source, name)
        .ok_or_else(|| ChecklistError::UnknownCheck {
            origin: source.to_owned(),
            name: name.to_owned(),
        })?;
    try_set_check_passed(checklist, vi, ci, new_value)
}

fn rebuild_verification(
    verification: &Verification,
    check_index: usize,
    new_value: bool,
) -> Verification {
    let checks = verification
        .checks()
        .iter()
        .enumerate()
        .map(|(ci, check)| {
            if ci == check_index {
                Arc::new(check.with_passed(new_value))
            } else {
                Arc::clone(check)
            }
        })
        .collect();

    Verification {
        source: verification.source.clone(),
        eligibility: Eligibility { checks },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexAxis;
    use crate::model::Check;

    fn aliased_pair() -> (Checklist, Arc<Check>) {
        let shared = Arc::new(Check::new("age", "Age", false));
        let list = Checklist::from_shared(vec![
            Arc::new(Verification::from_shared("S1", vec![Arc::clone(&shared)])),
            Arc::new(Verification::from_shared("S2", vec![Arc::clone(&shared)])),
        ]);
        (list, shared)
    }

    #[test]
    fn end_to_end_aliased_scenario() {
        let (input, shared) = aliased_pair();
        let output = set_check_passed(&input, 0, 0, true);

        assert!(output.as_slice()[0].checks()[0].passed);
        assert!(!output.as_slice()[1].checks()[0].passed);
        assert!(Arc::ptr_eq(&output.as_slice()[1], &input.as_slice()[1]));
        assert!(!Arc::ptr_eq(
            &output.as_slice()[0].checks()[0],
            &output.as_slice()[1].checks()[0]
        ));
        // The original shared check is untouched.
        assert!(!shared.passed);
        assert!(!input.as_slice()[0].checks()[0].passed);
    }

    #[test]
    fn untouched_checks_keep_identity() {
        let input = Checklist::new(vec![Verification::new(
            "S1",
            vec![
                Check::new("a", "A", false),
                Check::new("b", "B", false),
                Check::new("c", "C", true),
            ],
        )]);
        let output = set_check_passed(&input, 0, 1, true);
        let (old, new) = (input.as_slice()[0].checks(), output.as_slice()[0].checks());
        assert!(Arc::ptr_eq(&old[0], &new[0]));
        assert!(!Arc::ptr_eq(&old[1], &new[1]));
        assert!(Arc::ptr_eq(&old[2], &new[2]));
        assert!(!Arc::ptr_eq(&input.as_slice()[0], &output.as_slice()[0]));
        assert_eq!(output.as_slice()[0].source, "S1");
    }

    #[test]
    fn same_value_still_rebuilds_path() {
        let input = Checklist::new(vec![Verification::new(
            "S1",
            vec![Check::new("a", "A", true)],
        )]);
        let output = set_check_passed(&input, 0, 0, true);
        assert_eq!(output, input);
        assert!(!Arc::ptr_eq(
            &input.as_slice()[0].checks()[0],
            &output.as_slice()[0].checks()[0]
        ));
    }

    #[test]
    fn toggle_twice_restores_values() {
        let (input, _) = aliased_pair();
        let once = toggle_check(&input, 1, 0);
        assert!(once.as_slice()[1].checks()[0].passed);
        let twice = toggle_check(&once, 1, 0);
        assert_eq!(twice, input);
    }

    #[test]
    fn try_reports_invalid_index() {
        let (input, _) = aliased_pair();
        assert_eq!(
            try_set_check_passed(&input, 2, 0, true),
            Err(ChecklistError::InvalidIndex {
                axis: IndexAxis::Verification,
                index: 2,
                len: 2,
            })
        );
        assert_eq!(
            try_set_check_passed(&input, 0, 3, true),
            Err(ChecklistError::InvalidIndex {
                axis: IndexAxis::Check,
                index: 3,
                len: 1,
            })
        );
    }

    #[test]
    #[should_panic(expected = "verification index 9 out of bounds")]
    fn set_panics_on_invalid_index() {
        let (input, _) = aliased_pair();
        let _ = set_check_passed(&input, 9, 0, true);
    }

    #[test]
    fn by_key_resolves_source_and_name() {
        let (input, _) = aliased_pair();
        let output = set_check_passed_by_key(&input, "S2", "age", true).unwrap();
        assert!(!output.as_slice()[0].checks()[0].passed);
        assert!(output.as_slice()[1].checks()[0].passed);
        assert!(Arc::ptr_eq(&output.as_slice()[0], &input.as_slice()[0]));

        assert_eq!(
            set_check_passed_by_key(&input, "S3", "age", true),
            Err(ChecklistError::UnknownCheck {
                origin: "S3".into(),
                name: "age".into(),
            })
        );
    }
}
