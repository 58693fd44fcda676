//! Controller side-effects and intents.
//!
//! This module defines the [`ControllerAction`] enum, which represents
//! instructions produced by the [`crate::Controller`] state machine for the
//! runtime to execute against the UI surface, theme state, notification sink,
//! and timer.

use std::time::Duration;

use crate::{Notification, TimerId};

/// Actions produced by the Controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    /// Switch to the loading screen.
    ShowLoadingScreen,

    /// Switch to the chat screen.
    ShowChatScreen,

    /// Switch to the login prompt.
    ShowLoginScreen,

    /// Set the window title.
    SetTitle(String),

    /// Run first-connect initialization (chat page and action setup).
    Initialize,

    /// Schedule a reconnect timer.
    ScheduleReconnect {
        /// Timer to report back via
        /// [`crate::ControllerEvent::ReconnectTimerFired`].
        timer: TimerId,
        /// Delay before firing.
        delay: Duration,
    },

    /// Cancel a previously scheduled reconnect timer.
    CancelReconnect {
        /// Timer to cancel.
        timer: TimerId,
    },

    /// Set the process-wide "prefer dark theme" flag.
    SetPreferDarkTheme(bool),

    /// Hand a notification to the sink.
    Notify(Notification),
}
