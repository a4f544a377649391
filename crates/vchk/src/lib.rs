#![forbid(unsafe_code)]

//! vchk public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub use vchk_core::{
    Check, Checklist, ChecklistError, Eligibility, IndexAxis, ItemKey, KeyCollision, SharedCheck,
    Verification, dedup_identical_checks, find_key_collisions, key_for, set_check_passed,
    set_check_passed_by_key, shared_checks, toggle_check, try_set_check_passed,
};

#[cfg(feature = "widgets")]
pub use vchk_widgets::{
    ChecklistState, ChecklistView, Frame, KeyCode, KeyEvent, Rect, RenderedBlock, RenderedItem,
    StatefulWidget, Switch, SwitchEvent, SwitchGlyphs, ViewConfig, Widget,
};

pub mod prelude {
    pub use vchk_core as core;
    #[cfg(feature = "widgets")]
    pub use vchk_widgets as widgets;

    pub use vchk_core::{Check, Checklist, Verification, key_for, set_check_passed};
    #[cfg(feature = "widgets")]
    pub use vchk_widgets::{ChecklistState, ChecklistView, StatefulWidget, Widget};
}
