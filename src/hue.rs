use embassy_time::{Duration, Instant};

/// Global hue counter advanced on a wall-clock interval
///
/// Shared by every color-cycling effect and independent of their frame
/// rates: the hue moves by one step per elapsed interval, however often it is
/// sampled.
#[derive(Debug, Clone)]
pub struct HueClock {
    hue: u8,
    interval: Duration,
    last_step: Option<Instant>,
}

impl HueClock {
    pub const fn new(interval: Duration) -> Self {
        Self {
            hue: 0,
            interval,
            last_step: None,
        }
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the step interval; a zero interval freezes the hue
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Advance by the whole intervals elapsed since the last step
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, now: Instant) -> u8 {
        let last = *self.last_step.get_or_insert(now);
        let interval = self.interval.as_ticks();
        if interval == 0 {
            self.last_step = Some(now);
            return self.hue;
        }

        let steps = now.saturating_duration_since(last).as_ticks() / interval;
        if steps > 0 {
            self.hue = self.hue.wrapping_add((steps % 256) as u8);
            self.last_step = Some(last + Duration::from_ticks(steps * interval));
        }
        self.hue
    }
}
