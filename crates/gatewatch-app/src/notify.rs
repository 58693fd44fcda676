//! Message notifications.
//!
//! The [`NotificationFilter`] decides, per message-create event, whether the
//! user should be notified, and builds the [`Notification`] handed to the
//! sink. Suppression rules are evaluated in order; the first match wins:
//!
//! 1. The message does not mention the current user.
//! 2. The current user is in Do Not Disturb.

use std::fmt;

use gatewatch_core::{ChannelId, Message, SessionState, Status};
use sha2::{Digest, Sha256};
use url::Url;

use crate::ControllerConfig;

/// Notification identity.
///
/// Derived only from the channel so the sink can replace an older
/// notification for the same channel instead of stacking them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    /// Identity for notifications about `channel_id`.
    pub fn for_channel(channel_id: ChannelId) -> Self {
        let digest = Sha256::digest(channel_id.0.to_be_bytes());
        Self(hex::encode(&digest[..8]))
    }

    /// Identity as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notification icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Remote image.
    Url(String),
    /// Icon from the desktop icon theme.
    Named(String),
}

/// Notification sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Default incoming-message sound.
    Message,
}

/// Action run when the user activates a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    /// Application action name.
    pub action_id: String,
    /// Channel to open.
    pub argument: ChannelId,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identity used for coalescing.
    pub id: NotificationId,
    /// Title (`"author (channel)"`).
    pub title: String,
    /// Sanitized message preview.
    pub body: String,
    /// Author avatar or fallback icon.
    pub icon: Icon,
    /// Sound to play.
    pub sound: Sound,
    /// Activation action.
    pub action: NotificationAction,
}

/// Decides which messages become notifications and builds them.
#[derive(Debug, Clone)]
pub struct NotificationFilter {
    preview_max_chars: usize,
    avatar_size: u16,
    fallback_icon: String,
    open_channel_action: String,
}

impl NotificationFilter {
    /// Create a filter from controller configuration.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            preview_max_chars: config.preview_max_chars,
            avatar_size: config.avatar_size,
            fallback_icon: config.fallback_icon.clone(),
            open_channel_action: config.open_channel_action.clone(),
        }
    }

    /// Build the notification for `message`, or `None` if it is suppressed.
    pub fn filter<S>(&self, message: &Message, session: &S) -> Option<Notification>
    where
        S: SessionState + ?Sized,
    {
        if session.mention_count(message) == 0 {
            return None;
        }

        if session.status() == Status::DoNotDisturb {
            return None;
        }

        let channel_id = message.channel_id;
        let title = format!(
            "{} ({})",
            session.author_display_name(message),
            session.channel_name(channel_id)
        );
        let body = sanitize_preview(&session.message_preview(message), self.preview_max_chars);
        let icon = session
            .avatar_url(&message.author)
            .and_then(|raw| with_avatar_size(&raw, self.avatar_size))
            .map_or_else(|| Icon::Named(self.fallback_icon.clone()), Icon::Url);

        Some(Notification {
            id: NotificationId::for_channel(channel_id),
            title,
            body,
            icon,
            sound: Sound::Message,
            action: NotificationAction {
                action_id: self.open_channel_action.clone(),
                argument: channel_id,
            },
        })
    }
}

/// Collapse whitespace runs and truncate to `max_chars` characters, ending
/// with an ellipsis when shortened. A zero limit yields an empty body.
fn sanitize_preview(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut truncated: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

/// Rewrite the `size` query parameter of an avatar URL. `None` if `raw` is not
/// an absolute http(s) URL.
fn with_avatar_size(raw: &str, size: u16) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "size")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut().clear().extend_pairs(kept).append_pair("size", &size.to_string());
    Some(url.into())
}
