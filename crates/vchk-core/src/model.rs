#![forbid(unsafe_code)]

//! Checklist data model.
//!
//! A [`Checklist`] is an ordered list of [`Verification`]s, each carrying an
//! [`Eligibility`] with an ordered list of [`Check`]s. Order is rendering
//! order and is preserved by every operation in this crate.
//!
//! # Identity
//!
//! Verifications and checks are held behind [`Arc`]. "Same object" means
//! [`Arc::ptr_eq`]. Upstream producers may hand out one `Arc<Check>` from
//! several verifications when they deduplicate identical checks; that is
//! allowed. `Check` has no interior mutability, so a shared check can only
//! change by being replaced with a new allocation.
//!
//! # Invariants
//!
//! 1. Within one verification, check names are unique.
//! 2. `(source, name)` is unique across the whole checklist.
//! 3. A `Checklist` is never mutated in place; updates return a new value.
//!
//! Invariants 1 and 2 are checked by [`Checklist::validate`], not by the
//! constructors, so trusted callers pay nothing for them.

use std::sync::Arc;

use crate::error::{ChecklistError, IndexAxis, Result};

/// A single named boolean eligibility condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Check {
    /// Identifier, unique within one source only.
    pub name: String,
    /// Display label.
    pub label: String,
    pub passed: bool,
}

impl Check {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            passed,
        }
    }

    /// Copy of this check with `passed` replaced.
    #[must_use]
    pub fn with_passed(&self, passed: bool) -> Self {
        Self {
            passed,
            ..self.clone()
        }
    }
}

/// Ordered checks of one verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eligibility {
    pub checks: Vec<Arc<Check>>,
}

impl Eligibility {
    #[must_use]
    pub fn new(checks: impl IntoIterator<Item = Check>) -> Self {
        Self {
            checks: checks.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build from already-shared checks, keeping their identity.
    #[must_use]
    pub fn from_shared(checks: impl IntoIterator<Item = Arc<Check>>) -> Self {
        Self {
            checks: checks.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Position of the check called `name`, if any.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.checks.iter().position(|check| check.name == name)
    }
}

/// One source's set of eligibility checks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verification {
    pub source: String,
    pub eligibility: Eligibility,
}

impl Verification {
    #[must_use]
    pub fn new(source: impl Into<String>, checks: impl IntoIterator<Item = Check>) -> Self {
        Self {
            source: source.into(),
            eligibility: Eligibility::new(checks),
        }
    }

    /// Build from already-shared checks, keeping their identity.
    #[must_use]
    pub fn from_shared(
        source: impl Into<String>,
        checks: impl IntoIterator<Item = Arc<Check>>,
    ) -> Self {
        Self {
            source: source.into(),
            eligibility: Eligibility::from_shared(checks),
        }
    }

    /// The checks in rendering order.
    #[must_use]
    pub fn checks(&self) -> &[Arc<Check>] {
        &self.eligibility.checks
    }
}

/// The full ordered collection of verifications shown to the user.
///
/// Cloning a `Checklist` clones the outer vector of `Arc`s only; every
/// verification and check stays shared with the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Checklist {
    verifications: Vec<Arc<Verification>>,
}

impl Checklist {
    #[must_use]
    pub fn new(verifications: impl IntoIterator<Item = Verification>) -> Self {
        Self {
            verifications: verifications.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build from already-shared verifications, keeping their identity.
    #[must_use]
    pub fn from_shared(verifications: impl IntoIterator<Item = Arc<Verification>>) -> Self {
        Self {
            verifications: verifications.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.verifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verifications.is_empty()
    }

    #[must_use]
    pub fn get(&self, verification_index: usize) -> Option<&Arc<Verification>> {
        self.verifications.get(verification_index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Arc<Verification>] {
        &self.verifications
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Verification>> {
        self.verifications.iter()
    }

    /// The check at `(verification_index, check_index)`.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::InvalidIndex`] naming the axis that is out
    /// of range.
    pub fn check(&self, verification_index: usize, check_index: usize) -> Result<&Arc<Check>> {
        let verification =
            self.verifications
                .get(verification_index)
                .ok_or(ChecklistError::InvalidIndex {
                    axis: IndexAxis::Verification,
                    index: verification_index,
                    len: self.verifications.len(),
                })?;
        let checks = verification.checks();
        checks.get(check_index).ok_or(ChecklistError::InvalidIndex {
            axis: IndexAxis::Check,
            index: check_index,
            len: checks.len(),
        })
    }

    /// Total number of checks across all verifications.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.verifications.iter().map(|v| v.checks().len()).sum()
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.verifications
            .iter()
            .flat_map(|v| v.checks())
            .filter(|check| check.passed)
            .count()
    }

    /// Position of the check identified by `(source, name)`.
    ///
    /// When several verifications share a source, the first one holding a
    /// check with that name wins.
    #[must_use]
    pub fn position_of(&self, source: &str, name: &str) -> Option<(usize, usize)> {
        self.verifications
            .iter()
            .enumerate()
            .filter(|(_, v)| v.source == source)
            .find_map(|(vi, v)| v.eligibility.position_of(name).map(|ci| (vi, ci)))
    }

    /// Flat item index (render order) to `(verification, check)` position.
    #[must_use]
    pub fn position_at(&self, flat_index: usize) -> Option<(usize, usize)> {
        let mut remaining = flat_index;
        for (vi, verification) in self.verifications.iter().enumerate() {
            let n = verification.checks().len();
            if remaining < n {
                return Some((vi, remaining));
            }
            remaining -= n;
        }
        None
    }

    /// `(verification, check)` position to flat item index.
    #[must_use]
    pub fn flat_index(&self, verification_index: usize, check_index: usize) -> Option<usize> {
        let verification = self.verifications.get(verification_index)?;
        if check_index >= verification.checks().len() {
            return None;
        }
        let before: usize = self.verifications[..verification_index]
            .iter()
            .map(|v| v.checks().len())
            .sum();
        Some(before + check_index)
    }
}

impl<'a> IntoIterator for &'a Checklist {
    type Item = &'a Arc<Verification>;
    type IntoIter = std::slice::Iter<'a, Arc<Verification>>;

    fn into_iter(self) -> Self::IntoIter {
        self.verifications.iter()
    }
}

impl FromIterator<Verification> for Checklist {
    fn from_iter<I: IntoIterator<Item = Verification>>(iter: I) -> Self {
        Self::new(iter)
    }
}
