//! Property-based invariant tests for the checklist view driver.
//!
//! 1. Render keys of a render pass are unique.
//! 2. A toggle through the view calls `on_change` exactly once, with the
//!    same checklist the update engine produces for `!passed`.
//! 3. Every item's hit region maps back to that item.
//! 4. Keyboard focus always stays inside the item range.

use proptest::prelude::*;
use vchk_core::{Check, Checklist, Verification, set_check_passed};
use vchk_widgets::{
    ChecklistState, ChecklistView, Frame, KeyCode, KeyEvent, StatefulWidget, ViewConfig,
};

// ── Strategies ────────────────────────────────────────────────────────────

fn checklist_strategy() -> impl Strategy<Value = Checklist> {
    proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..=5), 1..=4).prop_map(
        |sources| {
            sources
                .into_iter()
                .enumerate()
                .map(|(vi, flags)| {
                    Verification::new(
                        format!("S{vi}"),
                        flags.into_iter().enumerate().map(|(ci, passed)| {
                            // Same names in every source, on purpose.
                            Check::new(format!("c{ci}"), format!("Check {ci}"), passed)
                        }),
                    )
                })
                .collect()
        },
    )
}

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Unique render keys
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn render_plan_keys_unique(list in checklist_strategy()) {
        let view = ChecklistView::new(&list, |_| {});
        let mut keys: Vec<String> = view
            .render_plan()
            .into_iter()
            .flat_map(|block| block.items.into_iter().map(|item| item.key))
            .collect();
        let total = keys.len();
        prop_assert_eq!(total, list.item_count());
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Toggle goes through the engine exactly once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn toggle_matches_engine(list in checklist_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(list.item_count() > 0);
        let flat = pick.index(list.item_count());
        let (v, c) = list.position_at(flat).expect("flat index in range");

        let mut calls = Vec::new();
        let mut view = ChecklistView::new(&list, |next| calls.push(next));
        view.toggle(v, c).expect("valid position");
        drop(view);

        prop_assert_eq!(calls.len(), 1);
        let old = list.check(v, c).expect("valid position").passed;
        prop_assert_eq!(&calls[0], &set_check_passed(&list, v, c, !old));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Hit regions map to their items
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hit_regions_cover_every_item(list in checklist_strategy(), columns in 1u16..=3) {
        let config = ViewConfig::default().with_columns(columns);
        let view = ChecklistView::new(&list, |_| {}).with_config(config);
        let height = u16::try_from(view.content_height()).expect("small layout");
        let mut frame = Frame::new(90, height.max(1));
        let mut state = ChecklistState::default();
        StatefulWidget::render(&view, frame.area(), &mut frame, &mut state);

        let mut hits: Vec<u64> = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if let Some(data) = frame.hit_test(x, y) {
                    if !hits.contains(&data) {
                        hits.push(data);
                    }
                }
            }
        }
        let expected: Vec<u64> = (0..list.item_count() as u64).collect();
        prop_assert_eq!(hits, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Focus stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn focus_stays_in_range(
        list in checklist_strategy(),
        keys in proptest::collection::vec(key_strategy(), 0..=30),
    ) {
        let mut view = ChecklistView::new(&list, |_| {});
        let mut state = ChecklistState::default();
        for code in keys {
            let _ = view.handle_key(&KeyEvent::new(code), &mut state);
            if list.item_count() > 0 {
                prop_assert!(state.focused < list.item_count());
            } else {
                prop_assert_eq!(state.focused, 0);
            }
        }
    }
}
