//! Application layer for Gatewatch
//!
//! Pure state machine and generic runtime that reconcile gateway session
//! events with UI screen state, enabling deterministic simulation testing with
//! the same code that runs in production.
//!
//! # Components
//!
//! - [`Controller`]: connection state machine (screens, reconnect debounce,
//!   one-time initialization)
//! - [`NotificationFilter`]: derives notifications from message events
//! - [`UiSurface`]/[`NotificationSink`]: traits for the excluded UI layer
//! - [`ThemeState`]: injected "prefer dark theme" flag
//! - [`Runtime`]: async orchestration loop over an [`Environment`]
//!
//! [`Environment`]: gatewatch_core::Environment

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod controller;
mod event;
mod notify;
mod runtime;
mod state;
mod surface;
mod system_env;
mod theme;

pub use action::ControllerAction;
pub use config::{
    ControllerConfig, DEFAULT_AVATAR_SIZE, DEFAULT_FALLBACK_ICON, DEFAULT_LOADING_TITLE,
    DEFAULT_OPEN_CHANNEL_ACTION, DEFAULT_PREVIEW_MAX_CHARS, DEFAULT_RECONNECT_DELAY,
};
pub use controller::Controller;
pub use event::ControllerEvent;
pub use notify::{Icon, Notification, NotificationAction, NotificationFilter, NotificationId, Sound};
pub use runtime::Runtime;
pub use state::{ConnectionState, Screen, TimerId};
pub use surface::{ChannelSink, NotificationSink, UiSurface};
pub use system_env::SystemEnv;
pub use theme::ThemeState;
