//! UI surface and notification sink that log instead of render.

use gatewatch_app::{Icon, Notification, NotificationSink, UiSurface};

/// Headless UI surface. Every screen switch becomes an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSurface;

impl UiSurface for LogSurface {
    fn show_loading_screen(&mut self) {
        tracing::info!(screen = "loading", "screen changed");
    }

    fn show_chat_screen(&mut self) {
        tracing::info!(screen = "chat", "screen changed");
    }

    fn show_login_screen(&mut self) {
        tracing::info!(screen = "login", "screen changed");
    }

    fn set_title(&mut self, title: &str) {
        tracing::info!(title, "title changed");
    }

    fn initialize(&mut self) {
        tracing::info!("chat page initialized");
    }
}

/// Notification sink that logs each notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn send(&mut self, notification: Notification) {
        let icon = match &notification.icon {
            Icon::Url(name) | Icon::Named(name) => name.as_str(),
        };
        tracing::info!(
            id = %notification.id,
            title = %notification.title,
            body = %notification.body,
            icon,
            action = %notification.action.action_id,
            channel = %notification.action.argument,
            "notification"
        );
    }
}
