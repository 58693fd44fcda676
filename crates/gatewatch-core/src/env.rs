//! Environment abstraction for deterministic testing.
//!
//! Decouples controller orchestration from the system clock. Production uses
//! real time and tokio timers; simulation uses a paused, manually advanced
//! clock so debounce timers can be exercised without waiting.

use std::{future::Future, time::Duration};

/// Abstract environment providing time and timers.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards
/// - A future returned by `sleep(d)` completes no earlier than `d` after the
///   call, as measured by `now()`
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use a virtual clock.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Timer future returned by [`Environment::sleep`].
    ///
    /// Owned and `'static` so a runtime can park it as its pending timer and
    /// drop it to cancel.
    type Sleep: Future<Output = ()> + Send + 'static;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Timer that completes after `duration`.
    ///
    /// This is the ONLY async primitive in the trait, and it should only be
    /// used by driver code (not by the controller state machine).
    fn sleep(&self, duration: Duration) -> Self::Sleep;
}
