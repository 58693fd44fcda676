//! Fuzz target for session event decoding
//!
//! Feed arbitrary bytes to the JSON event decoder (MEDIUM priority)
//!
//! # Invariants
//!
//! - Decoding never panics
//! - Anything that decodes re-encodes and decodes to the same event

#![no_main]

use gatewatch_core::SessionEvent;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(event) = serde_json::from_slice::<SessionEvent>(data) else {
        return;
    };

    let encoded = serde_json::to_vec(&event).expect("encode decoded event");
    let decoded: SessionEvent = serde_json::from_slice(&encoded).expect("decode re-encoded event");
    assert_eq!(decoded, event);
});
