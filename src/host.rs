//! Seams to the platform: clock, cooperative idle and outbound publishing.

use core::future::Future;

use embassy_time::{Duration, Instant};

/// Clock and suspension point supplied by the platform
///
/// `idle` is the only place the node gives up control while an effect runs.
/// Implementations service networking and the watchdog there and may return
/// before `max` has elapsed (for example when a message arrived); callers
/// re-check the clock and the mailbox after every call.
pub trait Host {
    /// Monotonic time
    fn now(&self) -> Instant;

    /// Yield to the platform for at most `max`
    fn idle(&mut self, max: Duration) -> impl Future<Output = ()>;
}

/// Outbound message sink
///
/// Publishing is best effort: the node never waits for delivery and does not
/// retry.
pub trait PublishOutbox {
    fn publish(&mut self, topic: &str, payload: &[u8]);
}
