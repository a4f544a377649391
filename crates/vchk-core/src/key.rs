#![forbid(unsafe_code)]

//! Render keys for checklist items.
//!
//! A check name is only unique within its source, so a render key built
//! from the name alone collides as soon as two sources share a check name
//! (`"age"` is the usual culprit) and toggle events end up attributed to
//! the wrong item. Keys here combine the source and the name.
//!
//! # Encoding
//!
//! `key = escape(source) ":" escape(name)` where `escape` turns `\` into
//! `\\` and `:` into `\:`. The first unescaped `:` always separates the two
//! fields, so the encoding is injective even when either field contains the
//! separator.

use std::fmt;

use ahash::AHashMap;

use crate::model::{Check, Checklist, Verification};

const SEPARATOR: char = ':';
const ESCAPE: char = '\\';

/// The render key of a check within a checklist.
pub fn key_for(verification: &Verification, check: &Check) -> String {
    ItemKey::new(&verification.source, &check.name).to_string()
}

/// Typed form of a render key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub source: String,
    pub name: String,
}

impl ItemKey {
    #[must_use]
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    /// Parse an encoded key back into its fields.
    ///
    /// Returns `None` when there is no unescaped separator or when an escape
    /// is followed by anything other than `\` or `:`.
    #[must_use]
    pub fn parse(encoded: &str) -> Option<Self> {
        let mut source = String::new();
        let mut name = String::new();
        let mut in_name = false;
        let mut chars = encoded.chars();
        while let Some(ch) = chars.next() {
            let out = if in_name { &mut name } else { &mut source };
            match ch {
                ESCAPE => match chars.next() {
                    Some(next @ (ESCAPE | SEPARATOR)) => out.push(next),
                    _ => return None,
                },
                SEPARATOR if !in_name => in_name = true,
                SEPARATOR => return None,
                other => out.push(other),
            }
        }
        in_name.then_some(Self { source, name })
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.source)?;
        write!(f, "{SEPARATOR}")?;
        write_escaped(f, &self.name)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    for ch in field.chars() {
        if ch == ESCAPE || ch == SEPARATOR {
            write!(f, "{ESCAPE}")?;
        }
        write!(f, "{ch}")?;
    }
    Ok(())
}

/// A key that more than one rendered item would receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    /// Every `(verification, check)` position that produced `key`, in
    /// render order.
    pub positions: Vec<(usize, usize)>,
}

impl Checklist {
    /// Render keys in render order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter()
            .flat_map(|v| v.checks().iter().map(move |c| key_for(v, c)))
            .collect()
    }
}

/// Keys shared by more than one item, ordered by first occurrence.
#[must_use]
pub fn find_key_collisions(checklist: &Checklist) -> Vec<KeyCollision> {
    let mut seen: AHashMap<String, usize> = AHashMap::new();
    let mut collisions: Vec<KeyCollision> = Vec::new();

    for (vi, verification) in checklist.iter().enumerate() {
        for (ci, check) in verification.checks().iter().enumerate() {
            let key = key_for(verification, check);
            match seen.get(&key) {
                Some(&slot) => collisions[slot].positions.push((vi, ci)),
                None => {
                    seen.insert(key.clone(), collisions.len());
                    collisions.push(KeyCollision {
                        key,
                        positions: vec![(vi, ci)],
                    });
                }
            }
        }
    }

    collisions.retain(|c| c.positions.len() > 1);
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_in_different_sources_gets_distinct_keys() {
        let a = Verification::new("A", vec![Check::new("age", "Age", false)]);
        let b = Verification::new("B", vec![Check::new("age", "Age", false)]);
        let ka = key_for(&a, &a.checks()[0]);
        let kb = key_for(&b, &b.checks()[0]);
        assert_ne!(ka, kb);
        assert_eq!(ka, "A:age");
    }

    #[test]
    fn separator_in_fields_does_not_collide() {
        // Naive "source:name" joining maps both of these to "a:b:c".
        let left = ItemKey::new("a:b", "c").to_string();
        let right = ItemKey::new("a", "b:c").to_string();
        assert_ne!(left, right);
        assert_eq!(left, r"a\:b:c");
        assert_eq!(right, r"a:b\:c");
    }

    #[test]
    fn parse_inverts_display() {
        for (source, name) in [("S1", "age"), ("a:b", "c"), (r"x\", ":"), ("", "")] {
            let key = ItemKey::new(source, name);
            assert_eq!(ItemKey::parse(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(ItemKey::parse("no-separator"), None);
        assert_eq!(ItemKey::parse("a:b:c"), None);
        assert_eq!(ItemKey::parse(r"a\x:b"), None);
        assert_eq!(ItemKey::parse(r"a:b\"), None);
    }

    #[test]
    fn collisions_report_every_position() {
        let list = Checklist::new(vec![
            Verification::new("S1", vec![Check::new("age", "Age", false)]),
            Verification::new("S2", vec![Check::new("age", "Age", false)]),
            Verification::new(
                "S1",
                vec![Check::new("id", "ID", true), Check::new("age", "Age", true)],
            ),
        ]);
        let collisions = find_key_collisions(&list);
        assert_eq!(
            collisions,
            vec![KeyCollision {
                key: "S1:age".into(),
                positions: vec![(0, 0), (2, 1)],
            }]
        );
    }

    #[test]
    fn keys_follow_render_order() {
        let list = Checklist::new(vec![
            Verification::new(
                "S1",
                vec![Check::new("a", "A", false), Check::new("b", "B", false)],
            ),
            Verification::new("S2", vec![Check::new("a", "A", false)]),
        ]);
        assert_eq!(list.keys(), vec!["S1:a", "S1:b", "S2:a"]);
    }
}
