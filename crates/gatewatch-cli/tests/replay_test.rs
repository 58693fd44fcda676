//! End-to-end replay tests on tokio's paused clock.
//!
//! Each test replays a script through the production runtime and checks the
//! controller's final state once the script runs out.

use std::future;

use gatewatch_app::{ConnectionState, Controller, ControllerConfig, Screen, ThemeState};
use gatewatch_cli::Script;

async fn replay(json: &str, theme: ThemeState) -> Controller {
    let script = Script::from_json(json).unwrap();
    gatewatch_cli::replay(script, ControllerConfig::default(), theme, future::pending()).await
}

#[tokio::test(start_paused = true)]
async fn unanswered_disconnect_ends_on_loading() {
    let controller = replay(
        r#"{ "user_id": 1, "steps": [
            { "event": { "type": "connected" } },
            { "after_ms": 100, "event": { "type": "disconnected", "code": 1006 } }
        ] }"#,
        ThemeState::default(),
    )
    .await;

    assert_eq!(controller.screen(), Some(Screen::Loading));
    assert_eq!(controller.connection_state(), ConnectionState::Reconnecting);
    assert_eq!(controller.pending_reconnect(), None);
    assert!(controller.is_initialized());
}

#[tokio::test(start_paused = true)]
async fn quick_reconnect_ends_on_chat() {
    let controller = replay(
        r#"{ "user_id": 1, "steps": [
            { "event": { "type": "connected" } },
            { "after_ms": 100, "event": { "type": "disconnected" } },
            { "after_ms": 1000, "event": { "type": "connected" } }
        ] }"#,
        ThemeState::default(),
    )
    .await;

    assert_eq!(controller.screen(), Some(Screen::Chat));
    assert_eq!(controller.pending_reconnect(), None);
}

#[tokio::test(start_paused = true)]
async fn disconnect_as_last_step_still_shows_loading() {
    let controller = replay(
        r#"{ "user_id": 1, "steps": [
            { "event": { "type": "connected" } },
            { "after_ms": 2500, "event": { "type": "disconnected" } }
        ] }"#,
        ThemeState::default(),
    )
    .await;

    assert_eq!(controller.screen(), Some(Screen::Loading));
    assert_eq!(controller.pending_reconnect(), None);
}

#[tokio::test(start_paused = true)]
async fn authentication_failure_ends_on_login() {
    let controller = replay(
        r#"{ "user_id": 1, "steps": [
            { "event": { "type": "closed", "code": 4004 } },
            { "event": { "type": "disconnected", "code": 4004, "error": "authentication failed" } },
            { "after_ms": 10, "event": { "type": "connected" } }
        ] }"#,
        ThemeState::default(),
    )
    .await;

    assert_eq!(controller.screen(), Some(Screen::LoginPrompt));
    assert!(!controller.is_initialized());
}

#[tokio::test(start_paused = true)]
async fn ready_sets_dark_theme() {
    let theme = ThemeState::default();
    replay(
        r#"{ "user_id": 1, "steps": [
            { "event": { "type": "ready", "user_settings": { "theme": "dark" } } },
            { "event": { "type": "connected" } }
        ] }"#,
        theme.clone(),
    )
    .await;

    assert!(theme.prefer_dark());
}
