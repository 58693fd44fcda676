//! Controller input events.
//!
//! Events originate from two distinct sources:
//! - The gateway session subscription.
//! - Reconnect timers the controller asked the runtime to schedule.

use gatewatch_core::SessionEvent;

use crate::TimerId;

/// Events processed by the Controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Event delivered by the session.
    Session(SessionEvent),

    /// A reconnect timer reached its deadline.
    ReconnectTimerFired {
        /// Timer that fired.
        timer: TimerId,
    },
}

impl From<SessionEvent> for ControllerEvent {
    fn from(event: SessionEvent) -> Self {
        Self::Session(event)
    }
}
