//! Scripted replay for the Gatewatch controller.
//!
//! The `gatewatch` binary reads a [`Script`] of timed gateway events, replays
//! it through the production [`gatewatch_app::Runtime`] with headless
//! implementations of the UI surface and notification sink, and reports the
//! final screen.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cli;
mod error;
mod log_surface;
mod replay;
mod script;

use std::future::Future;

pub use cli::Args;
pub use error::CliError;
use gatewatch_app::{Controller, ControllerConfig, Runtime, SystemEnv, ThemeState};
pub use log_surface::{LogSink, LogSurface};
pub use replay::ReplaySession;
pub use script::{Script, ScriptChannel, ScriptStep, StepAction};

/// Replay `script` until it runs out or `shutdown` completes.
///
/// Returns the controller in its final state.
pub async fn replay<F>(
    script: Script,
    config: ControllerConfig,
    theme: ThemeState,
    shutdown: F,
) -> Controller
where
    F: Future<Output = ()>,
{
    tracing::info!(
        user = %script.user_id,
        steps = script.steps.len(),
        duration = ?script.duration(),
        "replaying session script"
    );

    let session = ReplaySession::new(script);
    let runtime = Runtime::hook(session, LogSurface, LogSink, theme, SystemEnv::new(), config);
    runtime.run(shutdown).await
}
