//! Session scripts.
//!
//! A script describes the logged-in user and a timed list of gateway events:
//!
//! ```json
//! {
//!   "user_id": 1,
//!   "channels": [{ "id": 5, "name": "general" }],
//!   "steps": [
//!     { "after_ms": 0, "event": { "type": "connected" } },
//!     { "after_ms": 1000, "event": { "type": "disconnected", "code": 1006 } },
//!     { "after_ms": 500, "status": "do_not_disturb" }
//!   ]
//! }
//! ```
//!
//! `after_ms` is relative to the previous step.

use std::{path::Path, time::Duration};

use gatewatch_core::{ChannelId, SessionEvent, Status, UserId};
use serde::Deserialize;

use crate::CliError;

/// A named channel known to the scripted user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptChannel {
    /// Channel identifier.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    after_ms: u64,
    #[serde(default)]
    event: Option<SessionEvent>,
    #[serde(default)]
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct RawScript {
    user_id: UserId,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    channels: Vec<ScriptChannel>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

/// What a step does once its delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Deliver a gateway event.
    Event(SessionEvent),
    /// Change the user's presence status.
    Status(Status),
}

/// One timed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Delay after the previous step.
    pub after: Duration,
    /// Action to perform.
    pub action: StepAction,
}

/// A parsed session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Logged-in user.
    pub user_id: UserId,
    /// Initial presence status.
    pub status: Status,
    /// Known channels.
    pub channels: Vec<ScriptChannel>,
    /// Timed steps, in order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        let raw: RawScript = serde_json::from_str(json)?;

        let steps = raw
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let action = match (step.event, step.status) {
                    (Some(event), None) => StepAction::Event(event),
                    (None, Some(status)) => StepAction::Status(status),
                    _ => return Err(CliError::InvalidStep { index }),
                };
                Ok(ScriptStep { after: Duration::from_millis(step.after_ms), action })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { user_id: raw.user_id, status: raw.status, channels: raw.channels, steps })
    }

    /// Read and parse a script file.
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total scripted time.
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.after).sum()
    }
}

#[cfg(test)]
mod tests {
    use gatewatch_core::{CloseCode, Disconnect};

    use super::*;

    #[test]
    fn parses_events_and_status_changes() {
        let script = Script::from_json(
            r#"{
                "user_id": 1,
                "channels": [{ "id": 5, "name": "general" }],
                "steps": [
                    { "event": { "type": "connected" } },
                    { "after_ms": 1000, "event": { "type": "disconnected", "code": 1006 } },
                    { "after_ms": 500, "status": "do_not_disturb" },
                    { "after_ms": 10, "event": { "type": "typing_start" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.user_id, UserId(1));
        assert_eq!(script.status, Status::Online);
        assert_eq!(script.channels[0].name, "general");
        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[0].after, Duration::ZERO);
        assert_eq!(
            script.steps[1].action,
            StepAction::Event(SessionEvent::Disconnected(Disconnect::with_code(
                CloseCode::ABNORMAL
            )))
        );
        assert_eq!(script.steps[2].action, StepAction::Status(Status::DoNotDisturb));
        assert_eq!(script.steps[3].action, StepAction::Event(SessionEvent::Unknown));
        assert_eq!(script.duration(), Duration::from_millis(1510));
    }

    #[test]
    fn step_needs_exactly_one_action() {
        let neither = Script::from_json(r#"{ "user_id": 1, "steps": [{ "after_ms": 5 }] }"#);
        assert!(matches!(neither, Err(CliError::InvalidStep { index: 0 })));

        let both = Script::from_json(
            r#"{ "user_id": 1, "steps": [
                { "event": { "type": "connected" } },
                { "event": { "type": "connected" }, "status": "idle" }
            ] }"#,
        );
        assert!(matches!(both, Err(CliError::InvalidStep { index: 1 })));
    }

    #[test]
    fn malformed_json_is_a_script_error() {
        assert!(matches!(Script::from_json("{"), Err(CliError::Script(_))));
        assert!(matches!(Script::from_json(r#"{ "steps": [] }"#), Err(CliError::Script(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Script::from_path(Path::new("/nonexistent/gatewatch-script.json"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
