//! Command-line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use gatewatch_app::{
    ControllerConfig, DEFAULT_AVATAR_SIZE, DEFAULT_FALLBACK_ICON, DEFAULT_LOADING_TITLE,
    DEFAULT_OPEN_CHANNEL_ACTION, DEFAULT_PREVIEW_MAX_CHARS,
};

use crate::CliError;

/// Replay a gateway session script through the connection controller
#[derive(Parser, Debug)]
#[command(name = "gatewatch")]
#[command(about = "Replay gateway session scripts through the connection controller")]
#[command(version)]
pub struct Args {
    /// Path to the JSON session script
    pub script: PathBuf,

    /// Delay before a disconnect is shown as reconnecting, in milliseconds
    #[arg(long, default_value = "3000")]
    pub reconnect_delay_ms: u64,

    /// Window title shown with the loading screen
    #[arg(long, default_value = DEFAULT_LOADING_TITLE)]
    pub loading_title: String,

    /// Maximum notification preview length, in characters
    #[arg(long, default_value_t = DEFAULT_PREVIEW_MAX_CHARS)]
    pub preview_max_chars: usize,

    /// Avatar size requested for notification icons, in pixels
    #[arg(long, default_value_t = DEFAULT_AVATAR_SIZE)]
    pub avatar_size: u16,

    /// Named icon used when an avatar cannot be resolved
    #[arg(long, default_value = DEFAULT_FALLBACK_ICON)]
    pub fallback_icon: String,

    /// Action attached to message notifications
    #[arg(long, default_value = DEFAULT_OPEN_CHANNEL_ACTION)]
    pub open_channel_action: String,

    /// Start with the dark theme preferred
    #[arg(long)]
    pub prefer_dark: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Controller configuration from the command line.
    pub fn controller_config(&self) -> Result<ControllerConfig, CliError> {
        if self.preview_max_chars == 0 {
            return Err(CliError::Config("--preview-max-chars must be at least 1".to_string()));
        }
        if self.avatar_size == 0 {
            return Err(CliError::Config("--avatar-size must be at least 1".to_string()));
        }

        Ok(ControllerConfig {
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            loading_title: self.loading_title.clone(),
            preview_max_chars: self.preview_max_chars,
            avatar_size: self.avatar_size,
            fallback_icon: self.fallback_icon.clone(),
            open_channel_action: self.open_channel_action.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_controller_defaults() {
        let args = Args::try_parse_from(["gatewatch", "session.json"]).unwrap();

        assert_eq!(args.controller_config().unwrap(), ControllerConfig::default());
        assert_eq!(args.log_level, "info");
        assert!(!args.prefer_dark);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "gatewatch",
            "session.json",
            "--reconnect-delay-ms",
            "500",
            "--loading-title",
            "Reconnecting",
            "--prefer-dark",
        ])
        .unwrap();
        let config = args.controller_config().unwrap();

        assert_eq!(config.reconnect_delay, Duration::from_millis(500));
        assert_eq!(config.loading_title, "Reconnecting");
        assert!(args.prefer_dark);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let args =
            Args::try_parse_from(["gatewatch", "s.json", "--preview-max-chars", "0"]).unwrap();
        assert!(matches!(args.controller_config(), Err(CliError::Config(_))));

        let args = Args::try_parse_from(["gatewatch", "s.json", "--avatar-size", "0"]).unwrap();
        assert!(matches!(args.controller_config(), Err(CliError::Config(_))));
    }
}
