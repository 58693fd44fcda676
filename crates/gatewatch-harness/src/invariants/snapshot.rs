//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the controller's observable state plus the ordered
//! history of what happened to it. Invariants operate on snapshots rather
//! than live state to ensure consistent, atomic checks.

use gatewatch_app::{ConnectionState, Screen, TimerId};

use crate::UiCall;

/// One entry in the interleaved input/output history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Controller hooked to a session.
    Hooked,
    /// Session reported Connected.
    Connected,
    /// Session reported Disconnected.
    Disconnected {
        /// Disconnect was a logout.
        logged_out: bool,
    },
    /// Any other session event, by kind.
    Event(&'static str),
    /// A reconnect timer fired (live or stale).
    TimerFired(TimerId),
    /// Controller asked the UI surface for something.
    Ui(UiCall),
}

/// Snapshot of a controller under simulation.
#[derive(Debug, Clone)]
pub struct ControllerSnapshot {
    /// Screen last requested by the controller.
    pub screen: Option<Screen>,
    /// Connection state.
    pub connection_state: ConnectionState,
    /// Timer the controller considers pending.
    pub pending_reconnect: Option<TimerId>,
    /// Whether initialization has run.
    pub initialized: bool,
    /// Timers scheduled and neither cancelled nor fired, as tracked by the
    /// driver.
    pub live_timers: Vec<TimerId>,
    /// Ordered history of inputs and UI calls.
    pub history: Vec<Record>,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            screen: None,
            connection_state: ConnectionState::Reconnecting,
            pending_reconnect: None,
            initialized: false,
            live_timers: Vec::new(),
            history: Vec::new(),
        }
    }
}

impl ControllerSnapshot {
    /// UI calls in order, without inputs.
    pub fn ui_calls(&self) -> impl Iterator<Item = &UiCall> {
        self.history.iter().filter_map(|r| match r {
            Record::Ui(call) => Some(call),
            _ => None,
        })
    }
}
