//! Session that replays a [`Script`].
//!
//! Subscribing spawns a task that sleeps through each step's delay and then
//! delivers its event (or applies its status change). When the script runs
//! out the task drops its sender, which ends the runtime's event stream. A
//! reconnect timer already pending at that point still fires.

use std::sync::Arc;

use gatewatch_core::{
    Author, ChannelDirectory, ChannelId, EventSender, Message, Session, SessionError,
    SessionState, Status, UserId,
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{Script, ScriptStep, StepAction};

/// A gateway session backed by a script instead of a websocket.
#[derive(Debug)]
pub struct ReplaySession {
    user_id: UserId,
    channels: ChannelDirectory,
    status: Arc<watch::Sender<Status>>,
    steps: Vec<ScriptStep>,
    task: Option<JoinHandle<()>>,
    closed: bool,
}

impl ReplaySession {
    /// Session that will replay `script` once subscribed.
    pub fn new(script: Script) -> Self {
        let (status, _) = watch::channel(script.status);
        Self {
            user_id: script.user_id,
            channels: script.channels.into_iter().map(|c| (c.id, c.name)).collect(),
            status: Arc::new(status),
            steps: script.steps,
            task: None,
            closed: false,
        }
    }
}

async fn replay(steps: Vec<ScriptStep>, status: Arc<watch::Sender<Status>>, events: EventSender) {
    for (index, step) in steps.into_iter().enumerate() {
        tokio::time::sleep(step.after).await;
        match step.action {
            StepAction::Event(event) => {
                tracing::debug!(index, kind = event.kind(), "replaying event");
                if events.send(event).is_err() {
                    tracing::debug!(index, "subscriber gone, stopping replay");
                    return;
                }
            },
            StepAction::Status(next) => {
                tracing::debug!(index, status = ?next, "replaying status change");
                status.send_replace(next);
            },
        }
    }
    tracing::info!("script finished");
}

impl SessionState for ReplaySession {
    fn status(&self) -> Status {
        *self.status.borrow()
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
        message.content.clone()
    }

    fn avatar_url(&self, author: &Author) -> Option<String> {
        author.avatar_url.clone()
    }
}

impl Session for ReplaySession {
    fn subscribe(&mut self, events: EventSender) {
        if let Some(previous) = self.task.take() {
            previous.abort();
        }

        let steps = std::mem::take(&mut self.steps);
        let status = Arc::clone(&self.status);
        self.task = Some(tokio::spawn(replay(steps, status, events)));
    }

    fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::AlreadyClosed);
        }
        self.closed = true;

        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }
}
