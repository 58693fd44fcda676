//! Traits for the excluded UI layer.
//!
//! The controller never renders anything. A frontend implements
//! [`UiSurface`] for screen switching and [`NotificationSink`] for OS-level
//! notification presentation; the [`crate::Runtime`] calls them on its single
//! event-handling context.

use tokio::sync::mpsc;

use crate::Notification;

/// Screen-switching operations exposed by the window.
///
/// Side-effect only. Implementations must not block; the runtime calls them
/// inline while processing events.
pub trait UiSurface {
    /// Show the busy/"Connecting" screen.
    fn show_loading_screen(&mut self);

    /// Show the chat page.
    fn show_chat_screen(&mut self);

    /// Show the login prompt.
    fn show_login_screen(&mut self);

    /// Set the window title.
    fn set_title(&mut self, title: &str);

    /// Build the chat page and register application actions.
    ///
    /// Called at most once per hooked session, before the first
    /// [`UiSurface::show_chat_screen`].
    fn initialize(&mut self);
}

/// Destination for user notifications.
pub trait NotificationSink {
    /// Present or queue `notification`. Must not block.
    fn send(&mut self, notification: Notification);
}

/// Notification sink backed by an unbounded channel.
///
/// Sending never waits, so notification dispatch cannot stall event
/// handling. A presenter task drains the receiving half.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiver a presenter drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn send(&mut self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::warn!(id = %e.0.id, "notification presenter gone, dropping notification");
        }
    }
}
