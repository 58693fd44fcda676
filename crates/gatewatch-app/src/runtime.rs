//! Generic runtime for controller orchestration.
//!
//! The Runtime drives the event loop on a single context, coordinating
//! between:
//! - the session, which delivers events from its own task over a channel
//! - [`Controller`]: connection state machine
//! - [`UiSurface`], [`NotificationSink`], [`ThemeState`]: UI-side effects
//! - [`Environment`]: the reconnect timer
//!
//! Because every event (session or timer) is funneled through one
//! `tokio::select!` loop, the controller sees a serialized stream and needs
//! no locking.

use std::{future::Future, pin::Pin};

use gatewatch_core::{Environment, Session, SessionEvent};
use tokio::sync::mpsc;

use crate::{
    Controller, ControllerAction, ControllerConfig, ControllerEvent, NotificationSink, ThemeState,
    TimerId, UiSurface,
};

/// The one reconnect timer the runtime may be waiting on.
struct PendingTimer<E: Environment> {
    timer: TimerId,
    scheduled_at: E::Instant,
    sleep: Pin<Box<E::Sleep>>,
}

/// Generic runtime that orchestrates the Controller against a session.
///
/// # Type Parameters
///
/// - `S`: Gateway session
/// - `U`: UI surface
/// - `N`: Notification sink
/// - `E`: Environment providing timers
pub struct Runtime<S, U, N, E>
where
    S: Session,
    U: UiSurface,
    N: NotificationSink,
    E: Environment,
{
    session: S,
    surface: U,
    sink: N,
    theme: ThemeState,
    env: E,
    controller: Controller,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    reconnect: Option<PendingTimer<E>>,
}

impl<S, U, N, E> Runtime<S, U, N, E>
where
    S: Session,
    U: UiSurface,
    N: NotificationSink,
    E: Environment,
{
    /// Subscribe to `session` and show the initial loading screen.
    ///
    /// The session is closed when [`Runtime::run`] returns. A runtime that is
    /// dropped without running leaves the session open.
    pub fn hook(
        mut session: S,
        surface: U,
        sink: N,
        theme: ThemeState,
        env: E,
        config: ControllerConfig,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        session.subscribe(tx);

        let mut runtime = Self {
            session,
            surface,
            sink,
            theme,
            env,
            controller: Controller::new(config),
            events,
            reconnect: None,
        };

        let actions = runtime.controller.hook();
        runtime.execute(actions);
        runtime
    }

    /// Run the event loop until `shutdown` completes or the session's event
    /// stream ends, then close the session.
    ///
    /// A reconnect timer still pending when the stream ends is allowed to
    /// fire before the session is closed.
    ///
    /// Returns the controller in its final state. Session close errors are
    /// logged, never returned.
    pub async fn run<F>(mut self, shutdown: F) -> Controller
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut streaming = true;

        loop {
            if !streaming && self.reconnect.is_none() {
                break;
            }

            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                },

                event = self.events.recv(), if streaming => {
                    let Some(event) = event else {
                        tracing::info!(
                            pending = self.reconnect.is_some(),
                            "session event stream ended"
                        );
                        streaming = false;
                        continue;
                    };
                    tracing::trace!(kind = event.kind(), "session event");
                    self.dispatch(ControllerEvent::Session(event));
                },

                timer = next_reconnect(&mut self.reconnect) => {
                    self.reconnect = None;
                    self.dispatch(ControllerEvent::ReconnectTimerFired { timer });
                },
            }
        }

        self.close()
    }

    fn dispatch(&mut self, event: ControllerEvent) {
        let actions = self.controller.handle(event, &self.session);
        self.execute(actions);
    }

    fn execute(&mut self, actions: Vec<ControllerAction>) {
        for action in actions {
            match action {
                ControllerAction::ShowLoadingScreen => self.surface.show_loading_screen(),
                ControllerAction::ShowChatScreen => self.surface.show_chat_screen(),
                ControllerAction::ShowLoginScreen => self.surface.show_login_screen(),
                ControllerAction::SetTitle(title) => self.surface.set_title(&title),
                ControllerAction::Initialize => self.surface.initialize(),
                ControllerAction::SetPreferDarkTheme(prefer_dark) => {
                    self.theme.set_prefer_dark(prefer_dark);
                },
                ControllerAction::Notify(notification) => self.sink.send(notification),
                ControllerAction::ScheduleReconnect { timer, delay } => {
                    tracing::debug!(%timer, ?delay, "reconnect timer scheduled");
                    self.reconnect = Some(PendingTimer {
                        timer,
                        scheduled_at: self.env.now(),
                        sleep: Box::pin(self.env.sleep(delay)),
                    });
                },
                ControllerAction::CancelReconnect { timer } => {
                    if let Some(pending) = self.reconnect.take_if(|p| p.timer == timer) {
                        let elapsed = self.env.now() - pending.scheduled_at;
                        tracing::debug!(%timer, ?elapsed, "reconnect timer cancelled");
                    }
                },
            }
        }
    }

    fn close(mut self) -> Controller {
        tracing::info!("closing session");
        if let Err(e) = self.session.close() {
            tracing::error!(error = %e, "error closing session");
        }
        self.controller
    }
}

/// Resolve when the pending reconnect timer fires; never if none is pending.
async fn next_reconnect<E: Environment>(pending: &mut Option<PendingTimer<E>>) -> TimerId {
    match pending {
        Some(pending) => {
            pending.sleep.as_mut().await;
            pending.timer
        },
        None => std::future::pending().await,
    }
}
