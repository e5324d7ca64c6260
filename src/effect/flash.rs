//! Whole-strip and single-pixel flashing plus the brightness ramp.

use super::{Effect, Limits, Vertical};
use crate::OutputDriver;
use crate::color::Rgb;
use crate::engine::{Engine, Step, proceed};
use crate::host::Host;

/// Flash one random pixel per cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomFlash {
    pub limits: Limits,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
}

impl RandomFlash {
    async fn flash<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.strip().len();
        let index = i32::try_from(engine.rng().index_below(len)).unwrap_or(0);
        engine.strip_mut().set(index, self.on, true);
        engine.pause(self.on_time_ms).await?;
        engine.strip_mut().set(index, self.off, true);
        engine.pause(self.off_time_ms).await
    }
}

impl Effect for RandomFlash {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            if !proceed(self.flash(engine).await)? {
                break;
            }
            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }

        engine.strip_mut().fill(self.off, true);
        Ok(())
    }
}

/// Alternate the whole strip between on and off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strobe {
    pub limits: Limits,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
}

impl Strobe {
    async fn flash<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        engine.strip_mut().fill(self.on, true);
        engine.pause(self.on_time_ms).await?;
        engine.strip_mut().fill(self.off, true);
        engine.pause(self.off_time_ms).await
    }
}

impl Effect for Strobe {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().reset_brightness();

        loop {
            if !proceed(self.flash(engine).await)? {
                break;
            }
            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}

/// Bursts of 2 to 5 flashes with random timing
///
/// The first long flash of a strike is the leader: it stays lit and then
/// dark noticeably longer than the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightning {
    pub limits: Limits,
    pub on: Rgb,
    pub off: Rgb,
}

impl Lightning {
    async fn strike<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let flashes = engine.rng().random8_range(2, 6);
        let mut leader_done = false;

        for _ in 0..flashes {
            let leader = engine.rng().random8_below(100) > 40 && !leader_done;

            engine.strip_mut().fill(self.on, true);
            let lit = if leader {
                engine.rng().random16_range(100, 350)
            } else {
                engine.rng().random16_range(20, 50)
            };
            engine.pause(u32::from(lit)).await?;

            engine.strip_mut().fill(self.off, true);
            let dark = if leader {
                engine.rng().random16_range(200, 500)
            } else {
                engine.rng().random16_range(30, 70)
            };
            engine.pause(u32::from(dark)).await?;

            leader_done |= leader;
        }
        Ok(())
    }
}

impl Effect for Lightning {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().reset_brightness();

        loop {
            if !proceed(self.strike(engine).await)? {
                break;
            }
            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}

/// Ramp global brightness between 0 and 255 showing a single color
///
/// The ramp runs to the end once started: steps wait with a hold that keeps
/// yielding to the host but does not observe new commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fade {
    pub direction: Vertical,
    /// Brightness change per step, at least 1
    pub increment: u8,
    pub step_ms: u32,
    pub color: Rgb,
}

impl Fade {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn brightness_at(&self, level: u16) -> u8 {
        let level = level.min(255) as u8;
        match self.direction {
            Vertical::Down => 255 - level,
            Vertical::Up => level,
        }
    }
}

impl Effect for Fade {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let increment = u16::from(self.increment.max(1));
        let mut level: u16 = 0;

        let strip = engine.strip_mut();
        strip.set_brightness(self.brightness_at(level));
        strip.paint(self.color);
        strip.show();

        while level < 255 {
            engine.hold(self.step_ms).await;
            level = (level + increment).min(255);

            let strip = engine.strip_mut();
            strip.set_brightness(self.brightness_at(level));
            strip.paint(self.color);
            strip.show();
        }
        Ok(())
    }
}
