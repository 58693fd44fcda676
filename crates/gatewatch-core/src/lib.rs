//! Core types for Gatewatch
//!
//! Gateway session events, the session collaborator traits the controller
//! consumes, and the environment abstraction that decouples timers from the
//! system clock.
//!
//! # Components
//!
//! - [`SessionEvent`]: closed set of gateway lifecycle and content events
//! - [`Session`]/[`SessionState`]: the remote session as seen by the client
//! - [`Environment`]: time source and timer factory (real or virtual)
//! - [`SessionError`]: errors surfaced by a session

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod event;
pub mod model;
pub mod session;

pub use env::Environment;
pub use error::SessionError;
pub use event::{CloseCode, Disconnect, SessionEvent, UserSettings};
pub use model::{Author, ChannelDirectory, ChannelId, Message, MessageId, Status, Theme, UserId};
pub use session::{EventSender, Session, SessionState};
