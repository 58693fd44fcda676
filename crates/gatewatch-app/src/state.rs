//! Observable controller state types.
//!
//! These are the pieces of controller state that drivers, tests, and
//! invariant checks are allowed to read. Only the [`crate::Controller`]
//! mutates them.

use std::fmt;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected. Either never connected yet or waiting for the gateway
    /// to come back.
    Reconnecting,
    /// Gateway connected.
    Connected,
}

/// Screen most recently requested of the UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Busy/"Connecting" screen.
    Loading,
    /// Main chat page.
    Chat,
    /// Re-authentication prompt. Terminal for a controller instance.
    LoginPrompt,
}

/// Identifier of a scheduled reconnect timer.
///
/// Allocated from a per-controller counter that never repeats, so a timer
/// that fires after being replaced or cancelled can be recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}
