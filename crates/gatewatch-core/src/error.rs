//! Error types for gateway sessions.
//!
//! No error in the controller path is returned to a caller; these errors only
//! surface at the session boundary (closing on shutdown) where they are
//! logged.

use thiserror::Error;

/// Errors that can occur while operating a gateway session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was already closed.
    #[error("session already closed")]
    AlreadyClosed,

    /// Underlying transport error.
    #[error("transport error: {0}")]
    Transport(String),
}
