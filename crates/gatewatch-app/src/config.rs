//! Controller configuration.

use std::time::Duration;

/// Delay before a non-logout disconnect is shown as "reconnecting".
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Window title while the loading screen is visible.
pub const DEFAULT_LOADING_TITLE: &str = "Connecting";

/// Maximum characters of message preview in a notification body.
pub const DEFAULT_PREVIEW_MAX_CHARS: usize = 120;

/// Avatar size requested for notification icons, in pixels.
pub const DEFAULT_AVATAR_SIZE: u16 = 64;

/// Named icon used when an author's avatar cannot be resolved.
pub const DEFAULT_FALLBACK_ICON: &str = "avatar-default-symbolic";

/// Application action activated by clicking a message notification.
pub const DEFAULT_OPEN_CHANNEL_ACTION: &str = "app.open-channel";

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Debounce delay between a disconnect and the loading screen
    pub reconnect_delay: Duration,
    /// Title set together with the loading screen
    pub loading_title: String,
    /// Preview truncation limit (characters, ellipsis included)
    pub preview_max_chars: usize,
    /// Requested avatar size for notification icons
    pub avatar_size: u16,
    /// Named icon used when no avatar URL is available
    pub fallback_icon: String,
    /// Action id attached to message notifications
    pub open_channel_action: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            loading_title: DEFAULT_LOADING_TITLE.to_string(),
            preview_max_chars: DEFAULT_PREVIEW_MAX_CHARS,
            avatar_size: DEFAULT_AVATAR_SIZE,
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
            open_channel_action: DEFAULT_OPEN_CHANNEL_ACTION.to_string(),
        }
    }
}
