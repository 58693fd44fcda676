//! Synchronous simulation driver.
//!
//! `SimDriver` steps a [`Controller`] directly, executing its actions against
//! recording surfaces the same way [`gatewatch_app::Runtime`] does, but with
//! timers under explicit test control. Timers never fire on their own: a test
//! (or a fuzzer) decides when the pending one fires and can replay stale ones
//! at will.

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use gatewatch_app::{
    Controller, ControllerAction, ControllerConfig, ControllerEvent, NotificationSink, ThemeState,
    TimerId, UiSurface,
};
use gatewatch_core::{
    Author, ChannelId, CloseCode, Disconnect, Message, MessageId, SessionEvent, Status, UserId,
    UserSettings,
};

use crate::{
    ControllerSnapshot, InvariantRegistry, Record, RecordingSink, RecordingSurface,
    ScriptedSession, SessionHandle, UiCall,
};

/// User the default simulated session is logged in as.
const SIM_USER: UserId = UserId(1);

/// A single simulated input.
///
/// Designed for model-based testing: every variant maps to one controller
/// input, with payloads kept small so generated sequences stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Step {
    /// Gateway connected.
    Connected,
    /// Non-fatal gateway error.
    BackgroundError,
    /// Websocket closed without a logout code.
    Closed,
    /// Disconnected with an optional close code. Code 4004 is a logout.
    Dropped {
        /// Raw close code.
        code: Option<u16>,
    },
    /// Disconnected because the account was logged out.
    LoggedOut,
    /// Ready snapshot. `Some(true)` selects the dark theme, `Some(false)`
    /// light, `None` omits user settings.
    Ready {
        /// Theme choice.
        dark: Option<bool>,
    },
    /// A message in channel `channel`, mentioning the user if `mentioned`.
    Mention {
        /// Channel the message was posted in.
        channel: u8,
        /// Whether the user is mentioned.
        mentioned: bool,
    },
    /// Toggle do-not-disturb.
    SetDoNotDisturb(bool),
    /// An event the controller ignores.
    Unknown,
    /// Fire the pending reconnect timer, if any.
    FirePending,
    /// Fire a timer that is no longer pending.
    FireStale,
}

/// Simulation driver for deterministic controller testing.
pub struct SimDriver {
    controller: Controller,
    session: ScriptedSession,
    handle: SessionHandle,
    surface: RecordingSurface,
    sink: RecordingSink,
    theme: ThemeState,
    /// Timers scheduled and neither cancelled nor fired.
    live_timers: BTreeSet<TimerId>,
    /// Most recently cancelled or fired timer.
    retired_timer: Option<TimerId>,
    history: Vec<Record>,
    next_message: u64,
    invariants: Option<InvariantRegistry>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Driver with the default configuration and a session for user 1.
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Driver with a custom configuration.
    pub fn with_config(config: ControllerConfig) -> Self {
        let session = ScriptedSession::new(SIM_USER).with_channel(ChannelId(0), "general");
        let handle = session.handle();
        Self {
            controller: Controller::new(config),
            session,
            handle,
            surface: RecordingSurface::new(),
            sink: RecordingSink::new(),
            theme: ThemeState::default(),
            live_timers: BTreeSet::new(),
            retired_timer: None,
            history: Vec::new(),
            next_message: 0,
            invariants: None,
        }
    }

    /// Replace the simulated session.
    #[must_use]
    pub fn with_session(mut self, session: ScriptedSession) -> Self {
        self.handle = session.handle();
        self.session = session;
        self
    }

    /// Enable invariant checking after every step.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Hook the controller to the session.
    pub fn hook(&mut self) -> Vec<ControllerAction> {
        self.history.push(Record::Hooked);
        let actions = self.controller.hook();
        self.execute(&actions);
        self.check_invariants("after hook");
        actions
    }

    /// Deliver a session event.
    pub fn deliver(&mut self, event: SessionEvent) -> Vec<ControllerAction> {
        self.history.push(match &event {
            SessionEvent::Connected => Record::Connected,
            SessionEvent::Disconnected(disconnect) => {
                Record::Disconnected { logged_out: disconnect.is_logged_out() }
            },
            other => Record::Event(other.kind()),
        });

        let actions = self.controller.handle(ControllerEvent::Session(event), &self.session);
        self.execute(&actions);
        self.check_invariants("after session event");
        actions
    }

    /// Fire `timer` as if its deadline passed, whether or not it is live.
    pub fn fire_timer(&mut self, timer: TimerId) -> Vec<ControllerAction> {
        if self.live_timers.remove(&timer) {
            self.retired_timer = Some(timer);
        }
        self.history.push(Record::TimerFired(timer));

        let actions =
            self.controller.handle(ControllerEvent::ReconnectTimerFired { timer }, &self.session);
        self.execute(&actions);
        self.check_invariants("after timer fired");
        actions
    }

    /// Fire the live reconnect timer. Returns `None` if nothing is pending.
    pub fn fire_pending(&mut self) -> Option<Vec<ControllerAction>> {
        let timer = self.live_timers.first().copied()?;
        Some(self.fire_timer(timer))
    }

    /// Apply a generated step.
    pub fn apply(&mut self, step: Step) -> Vec<ControllerAction> {
        match step {
            Step::Connected => self.deliver(SessionEvent::Connected),
            Step::BackgroundError => {
                self.deliver(SessionEvent::BackgroundError { error: "simulated".to_string() })
            },
            Step::Closed => self.deliver(SessionEvent::Closed {
                code: Some(CloseCode::ABNORMAL),
                error: None,
            }),
            Step::Dropped { code } => self.deliver(SessionEvent::Disconnected(Disconnect {
                code: code.map(CloseCode),
                error: None,
            })),
            Step::LoggedOut => self.deliver(SessionEvent::Disconnected(Disconnect::logged_out())),
            Step::Ready { dark } => {
                let user_settings = dark.map(|dark| UserSettings {
                    theme: Some(if dark { "dark" } else { "light" }.to_string()),
                });
                self.deliver(SessionEvent::Ready { user_settings })
            },
            Step::Mention { channel, mentioned } => {
                let message = self.message(ChannelId(u64::from(channel)), mentioned);
                self.deliver(SessionEvent::MessageCreated { message })
            },
            Step::SetDoNotDisturb(enabled) => {
                let status = if enabled { Status::DoNotDisturb } else { Status::Online };
                self.handle.set_status(status);
                vec![]
            },
            Step::Unknown => self.deliver(SessionEvent::Unknown),
            Step::FirePending => self.fire_pending().unwrap_or_default(),
            Step::FireStale => {
                let timer = self.retired_timer.unwrap_or(TimerId(u64::MAX));
                self.fire_timer(timer)
            },
        }
    }

    fn message(&mut self, channel_id: ChannelId, mentioned: bool) -> Message {
        let id = MessageId(self.next_message);
        self.next_message += 1;
        Message {
            id,
            channel_id,
            author: Author {
                id: UserId(2),
                username: "ferris".to_string(),
                nickname: None,
                avatar_url: Some("https://cdn.example.com/avatars/2.png?size=128".to_string()),
            },
            content: format!("message {id}"),
            mentions: if mentioned { vec![self.session.user_id()] } else { vec![] },
            mention_everyone: false,
        }
    }

    fn execute(&mut self, actions: &[ControllerAction]) {
        for action in actions {
            match action {
                ControllerAction::ShowLoadingScreen => {
                    self.surface.show_loading_screen();
                    self.history.push(Record::Ui(UiCall::Loading));
                },
                ControllerAction::ShowChatScreen => {
                    self.surface.show_chat_screen();
                    self.history.push(Record::Ui(UiCall::Chat));
                },
                ControllerAction::ShowLoginScreen => {
                    self.surface.show_login_screen();
                    self.history.push(Record::Ui(UiCall::Login));
                },
                ControllerAction::SetTitle(title) => {
                    self.surface.set_title(title);
                    self.history.push(Record::Ui(UiCall::Title(title.clone())));
                },
                ControllerAction::Initialize => {
                    self.surface.initialize();
                    self.history.push(Record::Ui(UiCall::Initialize));
                },
                ControllerAction::ScheduleReconnect { timer, .. } => {
                    self.live_timers.insert(*timer);
                },
                ControllerAction::CancelReconnect { timer } => {
                    if self.live_timers.remove(timer) {
                        self.retired_timer = Some(*timer);
                    }
                },
                ControllerAction::SetPreferDarkTheme(dark) => self.theme.set_prefer_dark(*dark),
                ControllerAction::Notify(notification) => self.sink.send(notification.clone()),
            }
        }
    }

    /// Snapshot of controller state and history for invariant checking.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            screen: self.controller.screen(),
            connection_state: self.controller.connection_state(),
            pending_reconnect: self.controller.pending_reconnect(),
            initialized: self.controller.is_initialized(),
            live_timers: self.live_timers.iter().copied().collect(),
            history: self.history.clone(),
        }
    }

    fn check_invariants(&self, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&self.snapshot(), context);
        }
    }

    /// The controller under test.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Recorded UI calls.
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Recorded notifications.
    pub fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    /// Theme state written by Ready events.
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Handle to the simulated session.
    pub fn session_handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Timers scheduled and neither cancelled nor fired.
    pub fn live_timers(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.live_timers.iter().copied()
    }

    /// Interleaved input and UI call history.
    pub fn history(&self) -> &[Record] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_shows_loading_screen() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        driver.hook();

        assert_eq!(driver.surface().last_screen(), Some(UiCall::Loading));
        assert_eq!(driver.surface().title().as_deref(), Some("Connecting"));
        assert_eq!(driver.history().first(), Some(&Record::Hooked));
    }

    #[test]
    fn disconnect_tracks_live_timer() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        driver.hook();
        driver.apply(Step::Connected);
        driver.apply(Step::Dropped { code: None });

        assert_eq!(driver.live_timers().count(), 1);
        assert!(driver.fire_pending().is_some());
        assert_eq!(driver.live_timers().count(), 0);
        assert!(driver.fire_pending().is_none());
    }

    #[test]
    fn stale_timer_without_history_is_ignored() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        driver.hook();

        assert!(driver.apply(Step::FireStale).is_empty());
    }

    #[test]
    fn do_not_disturb_step_changes_session_status() {
        let mut driver = SimDriver::new();
        driver.hook();
        driver.apply(Step::SetDoNotDisturb(true));
        driver.apply(Step::Mention { channel: 0, mentioned: true });

        assert!(driver.sink().is_empty());
    }
}
