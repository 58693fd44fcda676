//! Gateway session events.
//!
//! [`SessionEvent`] is the closed set of events a session delivers to its
//! subscribers. Events the client does not react to arrive as
//! [`SessionEvent::Unknown`] and are ignored downstream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Message;

/// Gateway websocket close code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloseCode(pub u16);

impl CloseCode {
    /// Normal closure.
    pub const NORMAL: Self = Self(1000);
    /// Abnormal closure (no close frame received).
    pub const ABNORMAL: Self = Self(1006);
    /// Unknown gateway error. Reconnect is allowed.
    pub const UNKNOWN_ERROR: Self = Self(4000);
    /// The account token sent with identify is invalid.
    pub const AUTHENTICATION_FAILED: Self = Self(4004);
    /// Session timed out. Reconnect is allowed.
    pub const SESSION_TIMED_OUT: Self = Self(4009);

    /// Whether this close means the account was logged out.
    pub fn is_logged_out(self) -> bool {
        self == Self::AUTHENTICATION_FAILED
    }
}

impl fmt::Display for CloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reason a session disconnected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disconnect {
    /// Close code, if the gateway sent one.
    #[serde(default)]
    pub code: Option<CloseCode>,
    /// Error that caused the disconnect, if any.
    #[serde(default)]
    pub error: Option<String>,
}

impl Disconnect {
    /// Disconnect with a close code and no error.
    pub fn with_code(code: CloseCode) -> Self {
        Self { code: Some(code), error: None }
    }

    /// Disconnect caused by the account being logged out.
    pub fn logged_out() -> Self {
        Self::with_code(CloseCode::AUTHENTICATION_FAILED)
    }

    /// Whether the session was ended by a logout. A logged-out session must
    /// not be reconnected.
    pub fn is_logged_out(&self) -> bool {
        self.code.is_some_and(CloseCode::is_logged_out)
    }
}

/// User settings delivered with the initial session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Display theme name (`"dark"`, `"light"`, or anything else).
    #[serde(default)]
    pub theme: Option<String>,
}

/// Events delivered by a gateway session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Gateway connected (or reconnected) and resumed or identified.
    Connected,

    /// Non-fatal error reported while the connection stays up.
    BackgroundError {
        /// Error description.
        error: String,
    },

    /// Websocket closed. A [`SessionEvent::Disconnected`] with the reason
    /// follows.
    Closed {
        /// Close code, if any.
        #[serde(default)]
        code: Option<CloseCode>,
        /// Error description, if any.
        #[serde(default)]
        error: Option<String>,
    },

    /// Session disconnected.
    Disconnected(Disconnect),

    /// Initial session snapshot.
    Ready {
        /// Current user settings. `None` if the gateway omitted them.
        #[serde(default)]
        user_settings: Option<UserSettings>,
    },

    /// A message was posted in a channel visible to the user.
    MessageCreated {
        /// The new message.
        message: Message,
    },

    /// Any event the client does not react to.
    #[serde(other)]
    Unknown,
}

impl SessionEvent {
    /// Short event name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::BackgroundError { .. } => "background_error",
            Self::Closed { .. } => "closed",
            Self::Disconnected(_) => "disconnected",
            Self::Ready { .. } => "ready",
            Self::MessageCreated { .. } => "message_created",
            Self::Unknown => "unknown",
        }
    }
}
