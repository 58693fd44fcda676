//! Scripted gateway session.
//!
//! `ScriptedSession` implements [`Session`] without any network: tests push
//! events through a [`SessionHandle`] as if the gateway had sent them, and
//! flip the user's status mid-run.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use gatewatch_core::{
    Author, ChannelDirectory, ChannelId, EventSender, Message, Session, SessionError,
    SessionEvent, SessionState, Status, UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between a session and its handles.
#[derive(Debug, Default)]
struct Shared {
    subscriber: Mutex<Option<EventSender>>,
    status: Mutex<Status>,
    closes: AtomicUsize,
}

/// In-memory session for tests and simulation.
#[derive(Debug, Clone)]
pub struct ScriptedSession {
    user_id: UserId,
    channels: ChannelDirectory,
    close_error: Option<SessionError>,
    shared: Arc<Shared>,
}

impl ScriptedSession {
    /// Session logged in as `user_id`, online, with no known channels.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            channels: ChannelDirectory::new(),
            close_error: None,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Start with the given status.
    #[must_use]
    pub fn with_status(self, status: Status) -> Self {
        *lock(&self.shared.status) = status;
        self
    }

    /// Register a channel name.
    #[must_use]
    pub fn with_channel(mut self, channel_id: ChannelId, name: impl Into<String>) -> Self {
        self.channels.insert(channel_id, name);
        self
    }

    /// Make `close` fail with `error`.
    #[must_use]
    pub fn with_close_error(mut self, error: SessionError) -> Self {
        self.close_error = Some(error);
        self
    }

    /// Handle for driving this session from a test.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle { shared: Arc::clone(&self.shared) }
    }

    /// Logged-in user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl SessionState for ScriptedSession {
    fn status(&self) -> Status {
        *lock(&self.shared.status)
    }

    fn mention_count(&self, message: &Message) -> u32 {
        message.mention_count_for(self.user_id)
    }

    fn author_display_name(&self, message: &Message) -> String {
        message.author.display_name().to_string()
    }

    fn channel_name(&self, channel_id: ChannelId) -> String {
        self.channels.name(channel_id)
    }

    fn message_preview(&self, message: &Message) -> String {
        if message.content.trim().is_empty() {
            "(no text)".to_string()
        } else {
            message.content.clone()
        }
    }

    fn avatar_url(&self, author: &Author) -> Option<String> {
        author.avatar_url.clone()
    }
}

impl Session for ScriptedSession {
    fn subscribe(&mut self, events: EventSender) {
        *lock(&self.shared.subscriber) = Some(events);
    }

    fn close(&mut self) -> Result<(), SessionError> {
        let previous = self.shared.closes.fetch_add(1, Ordering::SeqCst);
        lock(&self.shared.subscriber).take();

        if previous > 0 {
            return Err(SessionError::AlreadyClosed);
        }
        match self.close_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Test-side control of a [`ScriptedSession`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Deliver `event` to the subscriber. Returns `false` if nobody is
    /// subscribed or the subscriber is gone.
    pub fn emit(&self, event: SessionEvent) -> bool {
        lock(&self.shared.subscriber).as_ref().is_some_and(|tx| tx.send(event).is_ok())
    }

    /// Change the user's presence status.
    pub fn set_status(&self, status: Status) {
        *lock(&self.shared.status) = status;
    }

    /// Drop the subscription, ending the subscriber's event stream.
    pub fn end_stream(&self) {
        lock(&self.shared.subscriber).take();
    }

    /// Whether a subscriber is registered.
    pub fn is_subscribed(&self) -> bool {
        lock(&self.shared.subscriber).is_some()
    }

    /// Number of times `close` was called.
    pub fn close_count(&self) -> usize {
        self.shared.closes.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use gatewatch_core::MessageId;

    use super::*;

    fn message(mentions: Vec<UserId>, everyone: bool) -> Message {
        Message {
            id: MessageId(1),
            channel_id: ChannelId(9),
            author: Author {
                id: UserId(2),
                username: "ferris".to_string(),
                nickname: Some("Ferris the Crab".to_string()),
                avatar_url: None,
            },
            content: String::new(),
            mentions,
            mention_everyone: everyone,
        }
    }

    #[test]
    fn mention_count_includes_everyone() {
        let session = ScriptedSession::new(UserId(1));

        assert_eq!(session.mention_count(&message(vec![], false)), 0);
        assert_eq!(session.mention_count(&message(vec![UserId(3)], false)), 0);
        assert_eq!(session.mention_count(&message(vec![UserId(1)], false)), 1);
        assert_eq!(session.mention_count(&message(vec![UserId(1)], true)), 2);
    }

    #[test]
    fn names_fall_back_sensibly() {
        let session = ScriptedSession::new(UserId(1)).with_channel(ChannelId(5), "general");
        let msg = message(vec![], false);

        assert_eq!(session.author_display_name(&msg), "Ferris the Crab");
        assert_eq!(session.channel_name(ChannelId(5)), "general");
        assert_eq!(session.channel_name(ChannelId(6)), "#6");
        assert_eq!(session.message_preview(&msg), "(no text)");
    }

    #[test]
    fn second_close_reports_already_closed() {
        let mut session = ScriptedSession::new(UserId(1));
        let handle = session.handle();

        assert_eq!(session.close(), Ok(()));
        assert_eq!(session.close(), Err(SessionError::AlreadyClosed));
        assert_eq!(handle.close_count(), 2);
    }

    #[test]
    fn emit_requires_subscriber() {
        let mut session = ScriptedSession::new(UserId(1));
        let handle = session.handle();
        assert!(!handle.emit(SessionEvent::Connected));

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        session.subscribe(tx);
        assert!(handle.emit(SessionEvent::Connected));
        assert_eq!(rx.try_recv().ok(), Some(SessionEvent::Connected));
    }
}
