//! Beat-synchronized effects: positions and brightness follow sine waves of
//! wall-clock time.

use embassy_time::Duration;

use super::{Effect, Limits};
use crate::OutputDriver;
use crate::color::{
    PARTY_COLORS, Rgb, add_colors, color_from_palette, fade_to_black_by, hsv, is_rainbow,
    max_colors,
};
use crate::engine::{Engine, Step, proceed};
use crate::frame_scheduler::FramePacer;
use crate::host::Host;
use crate::math8::{beatsin8, beatsin16};

/// Trail fade applied every frame by the moving-dot effects
const TRAIL_FADE: u8 = 20;

/// Stripe pulse rate of [`Bpm`]
const STRIPE_BPM: u16 = 62;

/// Number of dots in [`Juggle`]
const JUGGLE_DOTS: u8 = 8;

/// A dot sweeping back and forth leaving a fading trail
///
/// One cycle is one return of the dot to index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cylon {
    pub limits: Limits,
    /// Dot color; the rainbow marker follows the global hue
    pub color: Rgb,
    pub frame_ms: u32,
    /// Sweeps per minute, at least 1
    pub bpm: u8,
    pub hue_update_ms: u8,
}

impl Cylon {
    /// Draw one frame and return the dot position
    fn draw<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> u16 {
        fade_to_black_by(engine.strip_mut().pixels_mut(), TRAIL_FADE);

        let len = u16::try_from(engine.strip().len()).unwrap_or(u16::MAX);
        let position = beatsin16(u16::from(self.bpm.max(1)), 0, len, engine.now_ms());
        let color = if is_rainbow(self.color) {
            let hue = engine.hue_tick();
            hsv(hue, 255, 192)
        } else {
            self.color
        };

        let strip = engine.strip_mut();
        let index = i32::from(position);
        if let Some(current) = strip.get(index) {
            strip.set(index, add_colors(current, color), false);
        }
        position
    }
}

impl Effect for Cylon {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.apply_hue_update(self.hue_update_ms);
        engine.strip_mut().reset_brightness();

        let mut at_start = false;
        loop {
            let position = self.draw(engine);
            engine.strip_mut().show();
            if !proceed(engine.pause(self.frame_ms).await)? {
                break;
            }

            match (position == 0, at_start) {
                (true, false) => {
                    cycles.record();
                    at_start = true;
                }
                (false, true) => at_start = false,
                _ => {}
            }
            if cycles.is_done(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}

/// Palette stripes pulsing at a fixed beat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bpm {
    pub duration_ms: u32,
    pub frame: Duration,
    pub hue_update_ms: u8,
}

impl Bpm {
    #[allow(clippy::cast_possible_truncation)]
    fn draw<D: OutputDriver, H: Host, const N: usize>(engine: &mut Engine<'_, D, H, N>) {
        let hue = engine.hue_tick();
        let beat = beatsin8(STRIPE_BPM, 64, 255, engine.now_ms());

        for (i, pixel) in engine.strip_mut().pixels_mut().iter_mut().enumerate() {
            let i = i as u8;
            let index = hue.wrapping_add(i.wrapping_mul(2));
            let brightness = beat.wrapping_sub(hue).wrapping_add(i.wrapping_mul(10));
            *pixel = color_from_palette(&PARTY_COLORS, index, brightness);
        }
    }
}

impl Effect for Bpm {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(Limits::duration(self.duration_ms));
        let mut pacer = FramePacer::new(self.frame);
        engine.apply_hue_update(self.hue_update_ms);
        engine.strip_mut().reset_brightness();

        loop {
            Self::draw(engine);
            engine.strip_mut().show();

            let next = pacer.tick(engine.now()).next_deadline;
            if !proceed(engine.pause_until(next).await)? {
                break;
            }
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}

/// Eight colored dots weaving in and out of sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Juggle {
    pub duration_ms: u32,
    pub frame: Duration,
}

impl Juggle {
    fn draw<D: OutputDriver, H: Host, const N: usize>(engine: &mut Engine<'_, D, H, N>) {
        let now_ms = engine.now_ms();
        let len = u16::try_from(engine.strip().len()).unwrap_or(u16::MAX);
        let strip = engine.strip_mut();
        fade_to_black_by(strip.pixels_mut(), TRAIL_FADE);

        let mut dot_hue: u8 = 0;
        for dot in 0..JUGGLE_DOTS {
            let index = i32::from(beatsin16(u16::from(dot) + 7, 0, len, now_ms));
            if let Some(current) = strip.get(index) {
                strip.set(index, max_colors(current, hsv(dot_hue, 200, 255)), false);
            }
            dot_hue = dot_hue.wrapping_add(32);
        }
    }
}

impl Effect for Juggle {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(Limits::duration(self.duration_ms));
        let mut pacer = FramePacer::new(self.frame);
        engine.strip_mut().reset_brightness();

        loop {
            Self::draw(engine);
            engine.strip_mut().show();

            let next = pacer.tick(engine.now()).next_deadline;
            if !proceed(engine.pause_until(next).await)? {
                break;
            }
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}
