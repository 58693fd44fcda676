//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios. History-based
//! checks restart at every [`Record::Hooked`], since hooking begins a new
//! controller lifetime.

use gatewatch_app::{ConnectionState, Screen};

use super::{ControllerSnapshot, Invariant, InvariantKind, InvariantResult, Record, Violation};
use crate::UiCall;

/// At most one reconnect timer is live, and it is the one the controller
/// considers pending.
pub struct AtMostOnePendingTimer;

impl Invariant for AtMostOnePendingTimer {
    fn kind(&self) -> InvariantKind {
        InvariantKind::AtMostOnePendingTimer
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        if state.live_timers.len() > 1 {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "{} live timers: {:?}",
                    state.live_timers.len(),
                    state.live_timers
                ),
            });
        }

        let live = state.live_timers.first().copied();
        if live != state.pending_reconnect {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "live timer {live:?} but controller pending {:?}",
                    state.pending_reconnect
                ),
            });
        }
        Ok(())
    }
}

/// Initialization runs at most once per hook, and the controller's latch
/// agrees with the history.
pub struct SingleInitialization;

impl Invariant for SingleInitialization {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SingleInitialization
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        let mut count = 0usize;
        for (position, record) in state.history.iter().enumerate() {
            match record {
                Record::Hooked => count = 0,
                Record::Ui(UiCall::Initialize) => {
                    count += 1;
                    if count > 1 {
                        return Err(Violation {
                            invariant: self.kind(),
                            message: format!("initialized again at history position {position}"),
                        });
                    }
                },
                _ => {},
            }
        }

        if state.initialized != (count == 1) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "latch says initialized={} but history has {count} initializations",
                    state.initialized
                ),
            });
        }
        Ok(())
    }
}

/// The chat screen is never shown before initialization.
pub struct InitializedBeforeChat;

impl Invariant for InitializedBeforeChat {
    fn kind(&self) -> InvariantKind {
        InvariantKind::InitializedBeforeChat
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        let mut initialized = false;
        for (position, record) in state.history.iter().enumerate() {
            match record {
                Record::Hooked => initialized = false,
                Record::Ui(UiCall::Initialize) => initialized = true,
                Record::Ui(UiCall::Chat) if !initialized => {
                    return Err(Violation {
                        invariant: self.kind(),
                        message: format!("chat shown uninitialized at history position {position}"),
                    });
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// No screen switch follows the login prompt.
pub struct LoginPromptTerminal;

impl Invariant for LoginPromptTerminal {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LoginPromptTerminal
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        let mut prompted = false;
        for (position, record) in state.history.iter().enumerate() {
            match record {
                Record::Hooked => prompted = false,
                Record::Ui(call) if call.is_screen() => {
                    if prompted {
                        return Err(Violation {
                            invariant: self.kind(),
                            message: format!(
                                "{call:?} after login prompt at history position {position}"
                            ),
                        });
                    }
                    prompted = *call == UiCall::Login;
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// The loading screen is never shown between a Connected event and the next
/// non-logout disconnect.
///
/// This is the debounce guarantee: a timer cancelled by Connected must not
/// flip the UI back to "Connecting" when its deadline passes.
pub struct NoLoadingWhileConnected;

impl Invariant for NoLoadingWhileConnected {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NoLoadingWhileConnected
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        let mut loading_allowed = true;
        let mut logged_out = false;

        for (position, record) in state.history.iter().enumerate() {
            match record {
                Record::Hooked => {
                    loading_allowed = true;
                    logged_out = false;
                },
                Record::Connected if !logged_out => loading_allowed = false,
                Record::Disconnected { logged_out: false } if !logged_out => loading_allowed = true,
                Record::Disconnected { logged_out: true } => logged_out = true,
                Record::Ui(UiCall::Loading) if !loading_allowed => {
                    return Err(Violation {
                        invariant: self.kind(),
                        message: format!(
                            "loading shown while connected at history position {position}"
                        ),
                    });
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// The controller's screen is the last screen the UI was asked to show, and
/// a connected controller is showing chat.
pub struct ScreenReflectsState;

impl Invariant for ScreenReflectsState {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ScreenReflectsState
    }

    fn check(&self, state: &ControllerSnapshot) -> InvariantResult {
        let shown = state.ui_calls().filter_map(|call| match call {
            UiCall::Loading => Some(Screen::Loading),
            UiCall::Chat => Some(Screen::Chat),
            UiCall::Login => Some(Screen::LoginPrompt),
            _ => None,
        });
        let last_shown = shown.last();

        if last_shown != state.screen {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "controller screen {:?} but UI last showed {last_shown:?}",
                    state.screen
                ),
            });
        }

        if state.connection_state == ConnectionState::Connected
            && state.screen != Some(Screen::Chat)
        {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("connected while showing {:?}", state.screen),
            });
        }
        Ok(())
    }
}
