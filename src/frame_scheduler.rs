//! Frame pacing for effects that render at a fixed rate.
//!
//! Deadlines advance by a whole frame each tick, so time spent drawing does
//! not stretch the frame. After a long stall the schedule restarts from the
//! current time instead of bursting to catch up.

use embassy_time::{Duration, Instant};

/// Frame period for `fps`, with 0 treated as 1 frame per second
pub fn frame_duration(fps: u8) -> Duration {
    Duration::from_millis(1000 / u64::from(fps.max(1)))
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
}

/// Deadline-based frame pacer
#[derive(Debug, Clone)]
pub struct FramePacer {
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl FramePacer {
    pub const fn new(frame_duration: Duration) -> Self {
        Self {
            next_frame: None,
            frame_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Mark a frame as drawn at `now` and compute the next deadline.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let mut next_frame = self.next_frame.unwrap_or(now);

        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = self.frame_duration * 2;
        if now > next_frame + max_drift {
            next_frame = now;
        }

        next_frame += self.frame_duration;
        self.next_frame = Some(next_frame);

        FrameResult {
            next_deadline: next_frame,
        }
    }
}
