//! Runtime tests on tokio's paused clock.
//!
//! The real [`Runtime`] runs in a spawned task against a [`ScriptedSession`]
//! and recording surfaces. With the clock paused, `tokio::time::sleep` in the
//! test only returns once the runtime task is idle, and reconnect delays
//! elapse in virtual time.

use std::time::Duration;

use gatewatch_app::{Controller, ControllerConfig, Runtime, Screen, ThemeState};
use gatewatch_core::{
    Author, ChannelId, Disconnect, Message, MessageId, SessionError, SessionEvent, UserId,
    UserSettings,
};
use gatewatch_harness::{
    RecordingSink, RecordingSurface, ScriptedSession, SessionHandle, SimEnv, UiCall,
};
use tokio::{sync::oneshot, task::JoinHandle};

/// A runtime running in its own task.
struct Running {
    handle: SessionHandle,
    surface: RecordingSurface,
    sink: RecordingSink,
    theme: ThemeState,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Controller>,
}

impl Running {
    fn start(session: ScriptedSession) -> Self {
        let handle = session.handle();
        let surface = RecordingSurface::new();
        let sink = RecordingSink::new();
        let theme = ThemeState::default();

        let runtime = Runtime::hook(
            session,
            surface.clone(),
            sink.clone(),
            theme.clone(),
            SimEnv,
            ControllerConfig::default(),
        );

        let (stop, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(runtime.run(async move {
            let _ = stop_rx.await;
        }));

        Self { handle, surface, sink, theme, stop, task }
    }

    fn emit(&self, event: SessionEvent) {
        assert!(self.handle.emit(event), "runtime is not subscribed");
    }

    async fn shutdown(self) -> Controller {
        let _ = self.stop.send(());
        self.task.await.expect("runtime task panicked")
    }
}

/// Let the runtime drain its queue.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn disconnect() -> SessionEvent {
    SessionEvent::Disconnected(Disconnect::default())
}

#[tokio::test(start_paused = true)]
async fn hook_shows_loading_before_any_event() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    assert_eq!(
        running.surface.calls(),
        vec![UiCall::Loading, UiCall::Title("Connecting".to_string())]
    );
    assert!(running.handle.is_subscribed());

    running.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn reconnect_before_deadline_cancels_timer() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    running.emit(SessionEvent::Connected);
    settle().await;
    running.emit(disconnect());
    tokio::time::sleep(Duration::from_secs(1)).await;
    running.emit(SessionEvent::Connected);
    settle().await;

    // Well past the original deadline
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(running.surface.last_screen(), Some(UiCall::Chat));
    assert_eq!(running.surface.count(&UiCall::Loading), 1);
    assert_eq!(running.surface.count(&UiCall::Initialize), 1);

    let controller = running.shutdown().await;
    assert_eq!(controller.pending_reconnect(), None);
    assert_eq!(controller.screen(), Some(Screen::Chat));
}

#[tokio::test(start_paused = true)]
async fn loading_shown_once_debounce_elapses() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    running.emit(SessionEvent::Connected);
    settle().await;
    running.emit(disconnect());

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(running.surface.last_screen(), Some(UiCall::Chat));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(running.surface.last_screen(), Some(UiCall::Loading));
    assert_eq!(running.surface.count(&UiCall::Loading), 2);
    assert_eq!(running.surface.count(&UiCall::Initialize), 1);

    running.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn second_disconnect_restarts_debounce() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    running.emit(SessionEvent::Connected);
    settle().await;
    running.emit(disconnect());
    tokio::time::sleep(Duration::from_secs(2)).await;
    running.emit(disconnect());

    // First deadline (t=3s) passes without effect
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(running.surface.last_screen(), Some(UiCall::Chat));

    // Second deadline (t=5s)
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(running.surface.last_screen(), Some(UiCall::Loading));

    running.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn logout_shows_login_and_schedules_nothing() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    running.emit(SessionEvent::Disconnected(Disconnect::logged_out()));
    settle().await;
    running.emit(SessionEvent::Connected);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(running.surface.last_screen(), Some(UiCall::Login));
    assert_eq!(running.surface.count(&UiCall::Initialize), 0);

    let controller = running.shutdown().await;
    assert!(controller.is_logged_out());
    assert_eq!(controller.pending_reconnect(), None);
}

#[tokio::test(start_paused = true)]
async fn ready_and_mentions_reach_theme_and_sink() {
    let session = ScriptedSession::new(UserId(1)).with_channel(ChannelId(5), "general");
    let running = Running::start(session);
    let mut theme_changes = running.theme.subscribe();

    running.emit(SessionEvent::Ready {
        user_settings: Some(UserSettings { theme: Some("dark".to_string()) }),
    });
    running.emit(SessionEvent::MessageCreated {
        message: Message {
            id: MessageId(10),
            channel_id: ChannelId(5),
            author: Author {
                id: UserId(2),
                username: "ferris".to_string(),
                nickname: None,
                avatar_url: None,
            },
            content: "ping @you".to_string(),
            mentions: vec![UserId(1)],
            mention_everyone: false,
        },
    });
    settle().await;

    assert!(theme_changes.has_changed().unwrap_or(false));
    assert!(running.theme.prefer_dark());

    let sent = running.sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "ferris (general)");

    running.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_session_once() {
    let running = Running::start(ScriptedSession::new(UserId(1)));
    let handle = running.handle.clone();

    running.shutdown().await;

    assert_eq!(handle.close_count(), 1);
    assert!(!handle.is_subscribed());
}

#[tokio::test(start_paused = true)]
async fn close_error_is_absorbed() {
    let session = ScriptedSession::new(UserId(1))
        .with_close_error(SessionError::Transport("socket reset".to_string()));
    let running = Running::start(session);
    let handle = running.handle.clone();

    running.emit(SessionEvent::Connected);
    settle().await;

    let controller = running.shutdown().await;
    assert_eq!(controller.screen(), Some(Screen::Chat));
    assert_eq!(handle.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn ended_stream_stops_runtime() {
    let running = Running::start(ScriptedSession::new(UserId(1)));
    running.handle.end_stream();

    let controller = running.task.await.expect("runtime task panicked");

    assert_eq!(controller.screen(), Some(Screen::Loading));
    assert_eq!(running.handle.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn ended_stream_lets_pending_reconnect_fire() {
    let running = Running::start(ScriptedSession::new(UserId(1)));

    running.emit(SessionEvent::Connected);
    settle().await;
    let dropped_at = tokio::time::Instant::now();
    running.emit(disconnect());
    running.handle.end_stream();

    let controller = running.task.await.expect("runtime task panicked");

    assert!(dropped_at.elapsed() >= Duration::from_secs(3));
    assert_eq!(controller.screen(), Some(Screen::Loading));
    assert_eq!(controller.pending_reconnect(), None);
    assert!(controller.is_initialized());
    assert_eq!(running.surface.last_screen(), Some(UiCall::Loading));
    assert_eq!(running.surface.count(&UiCall::Loading), 2);
    assert_eq!(running.handle.close_count(), 1);
}
