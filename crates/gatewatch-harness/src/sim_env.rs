//! Simulation Environment on tokio's paused clock.
//!
//! With the clock paused (`#[tokio::test(start_paused = true)]`), time only
//! moves when every task is idle or when a test calls [`SimEnv::advance`].
//! Timers then fire strictly in deadline order, which makes reconnect
//! debounce scenarios reproducible.

use std::time::Duration;

use gatewatch_core::Environment;

/// Environment backed by tokio's (pausable) clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimEnv;

impl SimEnv {
    /// Move the paused clock forward, firing every timer that becomes due.
    ///
    /// # Panics
    ///
    /// Panics if the clock is not paused.
    pub async fn advance(&self, duration: Duration) {
        tokio::time::advance(duration).await;
    }
}

impl Environment for SimEnv {
    type Instant = tokio::time::Instant;
    type Sleep = tokio::time::Sleep;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn paused_clock_only_moves_when_advanced() {
        let env = SimEnv;
        let start = env.now();

        env.advance(Duration::from_secs(3)).await;
        assert_eq!(env.now() - start, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_completes_at_virtual_deadline() {
        let env = SimEnv;
        let start = env.now();

        env.sleep(Duration::from_secs(3)).await;
        assert!(env.now() - start >= Duration::from_secs(3));
    }
}
