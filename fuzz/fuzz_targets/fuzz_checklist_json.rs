#![no_main]

use libfuzzer_sys::fuzz_target;
use vchk_core::{Checklist, find_key_collisions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(checklist) = Checklist::from_json_str(text) {
        assert!(find_key_collisions(&checklist).is_empty());
        assert_eq!(checklist.keys().len(), checklist.item_count());
    }
});
