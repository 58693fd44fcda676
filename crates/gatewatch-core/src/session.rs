//! Session collaborator traits.
//!
//! A session is the persistent real-time connection to the messaging backend.
//! The controller never owns the transport; it sees the session through two
//! narrow traits:
//!
//! - [`SessionState`]: read-only accessors used while building notifications
//! - [`Session`]: lifecycle (subscribe once, close once)

use tokio::sync::mpsc;

use crate::{
    error::SessionError,
    event::SessionEvent,
    model::{Author, ChannelId, Message, Status},
};

/// Sending half of an event subscription.
///
/// Sessions deliver events from their own task; the receiving half lives on
/// the single context that owns the controller.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;

/// Read-only view of session state needed to derive notifications.
pub trait SessionState {
    /// Current presence status of the logged-in user.
    fn status(&self) -> Status;

    /// Number of times the current user is mentioned by `message`.
    fn mention_count(&self, message: &Message) -> u32;

    /// Display name of the message author as the current user sees it.
    fn author_display_name(&self, message: &Message) -> String;

    /// Human-readable channel name.
    fn channel_name(&self, channel_id: ChannelId) -> String;

    /// Plain-text preview of the message content.
    fn message_preview(&self, message: &Message) -> String;

    /// Avatar URL for `author`. `None` if unresolvable.
    fn avatar_url(&self, author: &Author) -> Option<String>;
}

/// A gateway session.
pub trait Session: SessionState {
    /// Register `events` as the destination for every subsequent event.
    fn subscribe(&mut self, events: EventSender);

    /// Close the session.
    ///
    /// Called exactly once, at application shutdown.
    fn close(&mut self) -> Result<(), SessionError>;
}
