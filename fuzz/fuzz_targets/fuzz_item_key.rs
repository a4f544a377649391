#![no_main]

use libfuzzer_sys::fuzz_target;
use vchk_core::ItemKey;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Accepted keys are canonical: printing gives back the input.
    if let Some(key) = ItemKey::parse(text) {
        assert_eq!(key.to_string(), text);
    }
});
