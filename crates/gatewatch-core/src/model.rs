//! Gateway domain values carried by session events.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

/// Snowflake identifier of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

/// Snowflake identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Snowflake identifier of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presence status of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Online and receiving notifications.
    #[default]
    Online,
    /// Away.
    Idle,
    /// Do Not Disturb. Suppresses notifications.
    DoNotDisturb,
    /// Appears offline to others.
    Invisible,
    /// Offline.
    Offline,
}

/// Display theme preference stored in the user's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Dark theme.
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Parse a theme setting value. `None` for anything but `"dark"` or
    /// `"light"`.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Whether this theme maps to the "prefer dark" display flag.
    pub fn prefers_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Author of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// User ID.
    pub id: UserId,
    /// Account username.
    pub username: String,
    /// Display name override (guild nickname or global name).
    #[serde(default)]
    pub nickname: Option<String>,
    /// Avatar image URL. `None` if the user has no custom avatar.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Author {
    /// Name shown for this author: the nickname if set, else the username.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }
}

/// A message as delivered by a message-create event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    pub id: MessageId,
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// Message author.
    pub author: Author,
    /// Raw message content.
    #[serde(default)]
    pub content: String,
    /// Users explicitly mentioned.
    #[serde(default)]
    pub mentions: Vec<UserId>,
    /// Message mentions `@everyone`.
    #[serde(default)]
    pub mention_everyone: bool,
}

impl Message {
    /// Number of times this message mentions `user`. `@everyone` counts as
    /// one mention on top of any direct ones.
    pub fn mention_count_for(&self, user: UserId) -> u32 {
        let direct = self.mentions.iter().filter(|id| **id == user).count();
        u32::try_from(direct).unwrap_or(u32::MAX).saturating_add(u32::from(self.mention_everyone))
    }
}

/// Known channel names, keyed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDirectory {
    names: HashMap<ChannelId, String>,
}

impl ChannelDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or rename) a channel.
    pub fn insert(&mut self, channel_id: ChannelId, name: impl Into<String>) {
        self.names.insert(channel_id, name.into());
    }

    /// Display name of a channel, `#<id>` if unknown.
    pub fn name(&self, channel_id: ChannelId) -> String {
        self.names.get(&channel_id).cloned().unwrap_or_else(|| format!("#{channel_id}"))
    }
}

impl<N: Into<String>> FromIterator<(ChannelId, N)> for ChannelDirectory {
    fn from_iter<I: IntoIterator<Item = (ChannelId, N)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (channel_id, name) in iter {
            directory.insert(channel_id, name);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_setting_parses_known_values_only() {
        assert_eq!(Theme::from_setting("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_setting("light"), Some(Theme::Light));
        assert_eq!(Theme::from_setting("Dark"), None);
        assert_eq!(Theme::from_setting(""), None);
    }

    fn author(nickname: Option<&str>) -> Author {
        Author {
            id: UserId(2),
            username: "ferris".to_string(),
            nickname: nickname.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn nickname_overrides_username() {
        assert_eq!(author(None).display_name(), "ferris");
        assert_eq!(author(Some("Crab")).display_name(), "Crab");
    }

    #[test]
    fn everyone_adds_to_direct_mentions() {
        let message = Message {
            id: MessageId(1),
            channel_id: ChannelId(5),
            author: author(None),
            content: String::new(),
            mentions: vec![UserId(1), UserId(3), UserId(1)],
            mention_everyone: true,
        };

        assert_eq!(message.mention_count_for(UserId(1)), 3);
        assert_eq!(message.mention_count_for(UserId(3)), 2);
        assert_eq!(message.mention_count_for(UserId(9)), 1);
    }

    #[test]
    fn unknown_channels_fall_back_to_id() {
        let mut channels: ChannelDirectory = [(ChannelId(5), "general")].into_iter().collect();
        assert_eq!(channels.name(ChannelId(5)), "general");
        assert_eq!(channels.name(ChannelId(6)), "#6");

        channels.insert(ChannelId(6), "random");
        assert_eq!(channels.name(ChannelId(6)), "random");
    }

    #[test]
    fn status_uses_snake_case_names() {
        let status: Status = serde_json::from_str("\"do_not_disturb\"").unwrap();
        assert_eq!(status, Status::DoNotDisturb);
    }
}
