//! Connection state controller.
//!
//! This module defines the [`Controller`] state machine, which reconciles the
//! gateway session's event stream with the screen shown by the UI.
//!
//! This is a pure state machine: it consumes [`crate::ControllerEvent`] inputs
//! and produces [`crate::ControllerAction`] instructions for the runtime to
//! execute. Timers are requested and cancelled through actions and reported
//! back as events, so the reconnect debounce is fully deterministic under
//! test.
//!
//! # State Machine
//!
//! ```text
//!            hook
//!              │
//!              ↓        Connected           ┌──────┐
//!        ┌─────────┐ ─────────────────────> │ Chat │
//!        │ Loading │                        └──────┘
//!        └─────────┘ <── timer fires ──(pending)──┘ Disconnected
//!             │                                     (not logged out)
//!             │ Disconnected (logged out)
//!             ↓
//!      ┌─────────────┐
//!      │ LoginPrompt │  terminal
//!      └─────────────┘
//! ```
//!
//! # Invariants
//!
//! - At most one reconnect timer is pending.
//! - A Connected event cancels the pending timer; a timer that fires after
//!   being cancelled or replaced is ignored.
//! - Initialization runs exactly once per hook.
//! - Once the login prompt is shown, connection events no longer move the
//!   screen.

use gatewatch_core::{SessionEvent, SessionState, Theme};

use crate::{
    ConnectionState, ControllerAction, ControllerConfig, ControllerEvent, NotificationFilter,
    Screen, TimerId,
};

/// Connection state controller.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Controller {
    /// Configuration.
    config: ControllerConfig,
    /// Connection state.
    state: ConnectionState,
    /// Screen last requested. `None` until hooked.
    screen: Option<Screen>,
    /// Pending reconnect timer. `None` if no timer is scheduled.
    pending_reconnect: Option<TimerId>,
    /// Next timer ID to allocate.
    next_timer: u64,
    /// First-connect initialization has run.
    initialized: bool,
    /// Notification filter for message events.
    filter: NotificationFilter,
}

impl Controller {
    /// Create an unhooked controller.
    pub fn new(config: ControllerConfig) -> Self {
        let filter = NotificationFilter::new(&config);
        Self {
            config,
            state: ConnectionState::Reconnecting,
            screen: None,
            pending_reconnect: None,
            next_timer: 0,
            initialized: false,
            filter,
        }
    }

    /// Attach to a session.
    ///
    /// Resets the once-latch and the pending timer, then shows the loading
    /// screen before any event has been received.
    pub fn hook(&mut self) -> Vec<ControllerAction> {
        let mut actions = Vec::new();
        if let Some(timer) = self.pending_reconnect.take() {
            actions.push(ControllerAction::CancelReconnect { timer });
        }

        self.initialized = false;
        self.state = ConnectionState::Reconnecting;
        actions.extend(self.show_loading());
        actions
    }

    /// Process an event and return actions.
    ///
    /// `session` is consulted only for message events (mentions, status,
    /// names). Never fails: unrecognized events produce no actions.
    pub fn handle<S>(&mut self, event: ControllerEvent, session: &S) -> Vec<ControllerAction>
    where
        S: SessionState + ?Sized,
    {
        match event {
            ControllerEvent::Session(event) => self.handle_session_event(event, session),
            ControllerEvent::ReconnectTimerFired { timer } => self.handle_timer_fired(timer),
        }
    }

    fn handle_session_event<S>(&mut self, event: SessionEvent, session: &S) -> Vec<ControllerAction>
    where
        S: SessionState + ?Sized,
    {
        match event {
            SessionEvent::Connected => {
                tracing::info!("gateway connected");
                self.on_connected()
            },
            SessionEvent::BackgroundError { error } => {
                tracing::warn!(%error, "gateway background error");
                vec![]
            },
            SessionEvent::Closed { code, error } => {
                tracing::info!(?code, ?error, "gateway closed");
                vec![]
            },
            SessionEvent::Disconnected(disconnect) => {
                tracing::info!(code = ?disconnect.code, error = ?disconnect.error, "gateway disconnected");
                if disconnect.is_logged_out() {
                    self.on_logged_out()
                } else {
                    self.on_disconnected()
                }
            },
            SessionEvent::Ready { user_settings } => user_settings
                .and_then(|settings| settings.theme)
                .and_then(|theme| Theme::from_setting(&theme))
                .map(|theme| vec![ControllerAction::SetPreferDarkTheme(theme.prefers_dark())])
                .unwrap_or_default(),
            SessionEvent::MessageCreated { message } => self
                .filter
                .filter(&message, session)
                .map(|notification| vec![ControllerAction::Notify(notification)])
                .unwrap_or_default(),
            SessionEvent::Unknown => vec![],
        }
    }

    fn on_connected(&mut self) -> Vec<ControllerAction> {
        if self.is_logged_out() {
            tracing::debug!("ignoring connect after logout");
            return vec![];
        }

        let mut actions = Vec::new();

        // Cancel the debounce if we reconnected during it
        if let Some(timer) = self.pending_reconnect.take() {
            actions.push(ControllerAction::CancelReconnect { timer });
        }

        if !self.initialized {
            self.initialized = true;
            actions.push(ControllerAction::Initialize);
        }

        self.state = ConnectionState::Connected;
        self.screen = Some(Screen::Chat);
        actions.push(ControllerAction::ShowChatScreen);
        actions
    }

    fn on_disconnected(&mut self) -> Vec<ControllerAction> {
        if self.is_logged_out() {
            tracing::debug!("ignoring disconnect after logout");
            return vec![];
        }

        self.state = ConnectionState::Reconnecting;

        let mut actions = Vec::new();
        if let Some(timer) = self.pending_reconnect.take() {
            actions.push(ControllerAction::CancelReconnect { timer });
        }

        let timer = self.allocate_timer();
        self.pending_reconnect = Some(timer);
        actions.push(ControllerAction::ScheduleReconnect {
            timer,
            delay: self.config.reconnect_delay,
        });
        actions
    }

    fn on_logged_out(&mut self) -> Vec<ControllerAction> {
        let mut actions = Vec::new();
        if let Some(timer) = self.pending_reconnect.take() {
            actions.push(ControllerAction::CancelReconnect { timer });
        }

        self.state = ConnectionState::Reconnecting;
        if !self.is_logged_out() {
            self.screen = Some(Screen::LoginPrompt);
            actions.push(ControllerAction::ShowLoginScreen);
        }
        actions
    }

    fn handle_timer_fired(&mut self, timer: TimerId) -> Vec<ControllerAction> {
        if self.pending_reconnect != Some(timer) {
            tracing::debug!(%timer, "ignoring stale reconnect timer");
            return vec![];
        }

        self.pending_reconnect = None;
        self.show_loading()
    }

    fn show_loading(&mut self) -> Vec<ControllerAction> {
        self.screen = Some(Screen::Loading);
        vec![
            ControllerAction::ShowLoadingScreen,
            ControllerAction::SetTitle(self.config.loading_title.clone()),
        ]
    }

    fn allocate_timer(&mut self) -> TimerId {
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        timer
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Screen last requested. `None` if not hooked yet.
    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    /// Pending reconnect timer. `None` if none is scheduled.
    pub fn pending_reconnect(&self) -> Option<TimerId> {
        self.pending_reconnect
    }

    /// Whether first-connect initialization has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the login prompt has been shown.
    pub fn is_logged_out(&self) -> bool {
        self.screen == Some(Screen::LoginPrompt)
    }
}
