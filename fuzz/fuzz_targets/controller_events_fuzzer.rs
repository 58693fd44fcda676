//! Fuzz target for the connection controller
//!
//! Drive the controller with arbitrary event and timer sequences (HIGH
//! priority)
//!
//! # Strategy
//!
//! - Steps: every session event kind, pending and stale timer fires, status
//!   flips
//! - Rehooks: occasionally hook again mid-sequence to reset the controller
//! - Close codes: arbitrary u16 values, so 4004 logouts appear among drops
//!
//! # Invariants
//!
//! - At most one reconnect timer is live, and it is the controller's pending
//!   one
//! - Initialization runs at most once per hook, always before the chat screen
//! - Nothing switches screens after the login prompt
//! - The loading screen never follows Connected without an intervening
//!   disconnect

#![no_main]

use arbitrary::Arbitrary;
use gatewatch_app::Screen;
use gatewatch_harness::{InvariantRegistry, SimDriver, Step};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum FuzzOp {
    Step(Step),
    Rehook,
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    // SimDriver asserts every standard invariant after each step
    let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    driver.hook();

    for op in ops {
        match op {
            FuzzOp::Step(step) => {
                driver.apply(step);
            },
            FuzzOp::Rehook => {
                driver.hook();
                assert_eq!(driver.controller().screen(), Some(Screen::Loading));
            },
        }
    }
});
