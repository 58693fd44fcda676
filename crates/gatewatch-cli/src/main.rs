//! Gatewatch replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a session script with the default 3 s reconnect debounce
//! gatewatch session.json
//!
//! # Shorter debounce, verbose controller logs
//! gatewatch session.json --reconnect-delay-ms 500 --log-level debug
//! ```

use clap::Parser;
use gatewatch_app::ThemeState;
use gatewatch_cli::{Args, CliError, Script};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = args.controller_config()?;
    let script = Script::from_path(&args.script)?;
    let theme = ThemeState::new(args.prefer_dark);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let controller = gatewatch_cli::replay(script, config, theme.clone(), shutdown).await;

    tracing::info!(
        screen = ?controller.screen(),
        state = ?controller.connection_state(),
        initialized = controller.is_initialized(),
        prefer_dark = theme.prefer_dark(),
        "replay finished"
    );

    Ok(())
}
