#![forbid(unsafe_code)]

//! Shape validation for checklists handed over by producers outside the
//! crate.
//!
//! Checklists built in-process with the model constructors are trusted and
//! never validated implicitly. Anything parsed from JSON goes through
//! [`Checklist::validate`] before it is returned.

use ahash::AHashSet;

use crate::error::{ChecklistError, Result};
use crate::model::Checklist;

impl Checklist {
    /// Check the model invariants.
    ///
    /// # Errors
    ///
    /// - [`ChecklistError::EmptySource`] for a verification without source.
    /// - [`ChecklistError::DuplicateCheckName`] when a name repeats inside
    ///   one verification, or when two verifications with the same source
    ///   both hold a check with the same name (their render keys would
    ///   collide).
    pub fn validate(&self) -> Result<()> {
        let mut seen: AHashSet<(&str, &str)> = AHashSet::with_capacity(self.item_count());
        for (position, verification) in self.iter().enumerate() {
            if verification.source.is_empty() {
                return Err(ChecklistError::EmptySource { position });
            }
            for check in verification.checks() {
                if !seen.insert((verification.source.as_str(), check.name.as_str())) {
                    return Err(ChecklistError::DuplicateCheckName {
                        origin: verification.source.clone(),
                        name: check.name.clone(),
                    });
                }
            }
        }
        tracing::debug!(
            message = "checklist.validated",
            verifications = self.len(),
            items = self.item_count(),
        );
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl Checklist {
    /// Parse a checklist from JSON and validate it.
    ///
    /// The expected shape is a bare array:
    ///
    /// ```json
    /// [{"source": "S1", "eligibility": {"checks": [
    ///     {"name": "age", "label": "Age", "passed": false}
    /// ]}}]
    /// ```
    ///
    /// # Errors
    ///
    /// [`ChecklistError::Json`] for malformed input, or any error from
    /// [`Checklist::validate`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        let checklist: Self = serde_json::from_str(input)?;
        checklist.validate()?;
        Ok(checklist)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ChecklistError::Json`] if serialization fails.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Check, Verification};

    #[test]
    fn accepts_repeated_names_across_sources() {
        let list = Checklist::new(vec![
            Verification::new("S1", vec![Check::new("age", "Age", false)]),
            Verification::new("S2", vec![Check::new("age", "Age", false)]),
        ]);
        assert_eq!(list.validate(), Ok(()));
    }

    #[test]
    fn rejects_repeated_name_within_source() {
        let list = Checklist::new(vec![Verification::new(
            "S1",
            vec![Check::new("age", "Age", false), Check::new("age", "Age 2", true)],
        )]);
        assert_eq!(
            list.validate(),
            Err(ChecklistError::DuplicateCheckName {
                origin: "S1".into(),
                name: "age".into(),
            })
        );
    }

    #[test]
    fn rejects_colliding_keys_across_same_source() {
        let list = Checklist::new(vec![
            Verification::new("S1", vec![Check::new("age", "Age", false)]),
            Verification::new("S1", vec![Check::new("age", "Age", true)]),
        ]);
        assert!(matches!(
            list.validate(),
            Err(ChecklistError::DuplicateCheckName { .. })
        ));
    }

    #[test]
    fn rejects_empty_source() {
        let list = Checklist::new(vec![
            Verification::new("S1", vec![]),
            Verification::new("", vec![Check::new("age", "Age", false)]),
        ]);
        assert_eq!(
            list.validate(),
            Err(ChecklistError::EmptySource { position: 1 })
        );
    }

    #[test]
    fn empty_checklist_is_valid() {
        assert_eq!(Checklist::default().validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_preserves_order() {
        let input = r#"[
            {"source": "S1", "eligibility": {"checks": [
                {"name": "b", "label": "B", "passed": true},
                {"name": "a", "label": "A", "passed": false}
            ]}},
            {"source": "S2", "eligibility": {"checks": []}}
        ]"#;
        let list = Checklist::from_json_str(input).unwrap();
        assert_eq!(list.keys(), vec!["S1:b", "S1:a"]);
        let again = Checklist::from_json_str(&list.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(again, list);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_missing_field_is_reported() {
        let err = Checklist::from_json_str(r#"[{"source": "S1"}]"#).unwrap_err();
        assert!(matches!(err, ChecklistError::Json { .. }), "{err}");
    }
}
