//! Recording implementations of the UI surface and notification sink.
//!
//! Clones share the same log, so a test can hand one clone to a
//! [`gatewatch_app::Runtime`] and inspect another.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gatewatch_app::{Notification, NotificationSink, UiSurface};

/// A call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    /// `show_loading_screen`
    Loading,
    /// `show_chat_screen`
    Chat,
    /// `show_login_screen`
    Login,
    /// `set_title`
    Title(String),
    /// `initialize`
    Initialize,
}

impl UiCall {
    /// Whether this call switches screens.
    pub fn is_screen(&self) -> bool {
        matches!(self, Self::Loading | Self::Chat | Self::Login)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// UI surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<UiCall>>>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<UiCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls equal to `call`.
    pub fn count(&self, call: &UiCall) -> usize {
        lock(&self.calls).iter().filter(|c| *c == call).count()
    }

    /// Most recent screen switch. `None` if no screen was shown.
    pub fn last_screen(&self) -> Option<UiCall> {
        lock(&self.calls).iter().rev().find(|c| c.is_screen()).cloned()
    }

    /// Most recent title. `None` if no title was set.
    pub fn title(&self) -> Option<String> {
        lock(&self.calls).iter().rev().find_map(|c| match c {
            UiCall::Title(title) => Some(title.clone()),
            _ => None,
        })
    }

    fn record(&self, call: UiCall) {
        lock(&self.calls).push(call);
    }
}

impl UiSurface for RecordingSurface {
    fn show_loading_screen(&mut self) {
        self.record(UiCall::Loading);
    }

    fn show_chat_screen(&mut self) {
        self.record(UiCall::Chat);
    }

    fn show_login_screen(&mut self) {
        self.record(UiCall::Login);
    }

    fn set_title(&mut self, title: &str) {
        self.record(UiCall::Title(title.to_string()));
    }

    fn initialize(&mut self) {
        self.record(UiCall::Initialize);
    }
}

/// Notification sink that records every notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, in order.
    pub fn sent(&self) -> Vec<Notification> {
        lock(&self.sent).clone()
    }

    /// Number of notifications sent.
    pub fn len(&self) -> usize {
        lock(&self.sent).len()
    }

    /// Whether nothing was sent.
    pub fn is_empty(&self) -> bool {
        lock(&self.sent).is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn send(&mut self, notification: Notification) {
        lock(&self.sent).push(notification);
    }
}
