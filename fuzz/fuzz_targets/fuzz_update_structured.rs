#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vchk_core::{Check, Checklist, Verification, dedup_identical_checks, try_set_check_passed};

#[derive(Arbitrary, Debug)]
struct Input {
    sources: Vec<Vec<(u8, bool)>>,
    dedup: bool,
    updates: Vec<(u8, u8, bool)>,
}

fn build(sources: &[Vec<(u8, bool)>]) -> Checklist {
    sources
        .iter()
        .take(8)
        .enumerate()
        .map(|(vi, checks)| {
            let mut names: Vec<u8> = Vec::new();
            let checks: Vec<Check> = checks
                .iter()
                .take(8)
                .filter(|(name, _)| {
                    let fresh = !names.contains(name);
                    names.push(*name);
                    fresh
                })
                .map(|&(name, passed)| Check::new(format!("c{name}"), format!("C{name}"), passed))
                .collect();
            Verification::new(format!("S{vi}"), checks)
        })
        .collect()
}

fuzz_target!(|input: Input| {
    let mut list = build(&input.sources);
    if input.dedup {
        list = dedup_identical_checks(&list);
    }

    for (v, c, value) in input.updates.into_iter().take(32) {
        let (v, c) = (usize::from(v), usize::from(c));
        match try_set_check_passed(&list, v, c, value) {
            Ok(next) => {
                assert_eq!(next.len(), list.len());
                assert_eq!(next.check(v, c).map(|check| check.passed), Ok(value));
                for (i, (old, new)) in list.iter().zip(next.iter()).enumerate() {
                    if i != v {
                        assert!(Arc::ptr_eq(old, new));
                        continue;
                    }
                    for (j, (a, b)) in old.checks().iter().zip(new.checks()).enumerate() {
                        assert_eq!(j == c, !Arc::ptr_eq(a, b));
                    }
                }
                list = next;
            }
            Err(_) => assert!(list.check(v, c).is_err()),
        }
    }
});
