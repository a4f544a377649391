#![forbid(unsafe_code)]

//! Core: checklist data model, structural-sharing updates, and render keys.

pub mod audit;
pub mod boundary;
pub mod error;
pub mod key;
pub mod model;
pub mod update;

pub use audit::{SharedCheck, dedup_identical_checks, shared_checks};
pub use error::{ChecklistError, IndexAxis, Result};
pub use key::{ItemKey, KeyCollision, find_key_collisions, key_for};
pub use model::{Check, Checklist, Eligibility, Verification};
pub use update::{set_check_passed, set_check_passed_by_key, toggle_check, try_set_check_passed};
