//! Deterministic simulation harness for Gatewatch controller testing.
//!
//! Test implementations of the session, UI surface, notification sink, and
//! environment, plus a synchronous driver for stepping the controller without
//! an async runtime.
//!
//! # Simulation
//!
//! [`SimDriver`] applies [`Step`]s directly to a
//! [`gatewatch_app::Controller`] and records everything it asks of the UI.
//! [`SimEnv`] runs the real [`gatewatch_app::Runtime`] on tokio's paused
//! clock so reconnect delays elapse instantly and in deadline order.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the
//! controller invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod recording;
pub mod scripted_session;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    AtMostOnePendingTimer, ControllerSnapshot, InitializedBeforeChat, Invariant, InvariantKind,
    InvariantRegistry, InvariantResult, LoginPromptTerminal, NoLoadingWhileConnected, Record,
    ScreenReflectsState, SingleInitialization, Violation,
};
pub use recording::{RecordingSink, RecordingSurface, UiCall};
pub use scripted_session::{ScriptedSession, SessionHandle};
pub use sim_driver::{SimDriver, Step};
pub use sim_env::SimEnv;
