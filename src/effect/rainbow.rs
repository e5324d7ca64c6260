//! Procedural color-cycling effects driven by the global hue clock.
//!
//! These run at a fixed frame rate until cancelled or until their duration
//! ceiling. Exact colors are not part of the contract; only frame pacing,
//! bounds and cancellation are.

use embassy_time::Duration;

use super::Effect;
use crate::OutputDriver;
use crate::color::{Rgb, add_colors, blend_colors, fade_to_black_by, fill_rainbow, hsv, is_rainbow};
use crate::effect::Limits;
use crate::engine::{Engine, Step, proceed};
use crate::frame_scheduler::FramePacer;
use crate::host::Host;
use crate::math8::{beatsin88, sin16};

/// Hue advance between neighbouring pixels of the rainbow
const RAINBOW_DELTA_HUE: u8 = 7;

/// Scrolling rainbow with optional glitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rainbow {
    pub duration_ms: u32,
    /// Chance per frame (0-255) of adding one glitter pixel
    pub glitter_probability: u8,
    /// Glitter color; the rainbow marker picks a random hue
    pub glitter: Rgb,
    pub frame: Duration,
    pub hue_update_ms: u8,
}

impl Rainbow {
    fn draw<D: OutputDriver, H: Host, const N: usize>(&self, engine: &mut Engine<'_, D, H, N>) {
        let hue = engine.hue_tick();
        fill_rainbow(engine.strip_mut().pixels_mut(), hue, RAINBOW_DELTA_HUE);

        if self.glitter_probability > 0 && engine.rng().random8() < self.glitter_probability {
            let len = engine.strip().len();
            let index = engine.rng().index_below(len);
            let glitter = if is_rainbow(self.glitter) {
                let hue = engine.rng().random8();
                hsv(hue, 200, 255)
            } else {
                self.glitter
            };
            if let Some(pixel) = engine.strip_mut().pixels_mut().get_mut(index) {
                *pixel = add_colors(*pixel, glitter);
            }
        }
    }
}

impl Effect for Rainbow {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(Limits::duration(self.duration_ms));
        let mut pacer = FramePacer::new(self.frame);
        engine.apply_hue_update(self.hue_update_ms);
        engine.strip_mut().reset_brightness();

        loop {
            self.draw(engine);
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

/// Slowly drifting rainbow with breathing brightness waves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainbowFade {
    pub duration_ms: u32,
    pub frame: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Drift {
    pseudotime: u16,
    last_ms: u16,
    hue16: u16,
}

impl RainbowFade {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw<D: OutputDriver, H: Host, const N: usize>(
        engine: &mut Engine<'_, D, H, N>,
        drift: &mut Drift,
    ) {
        let ms = engine.now_ms();
        let sat8 = beatsin88(87, 220, 250, ms) as u8;
        let bright_depth = beatsin88(341, 96, 224, ms) as u8;
        let theta_inc = beatsin88(203, 25 * 256, 40 * 256, ms);
        let ms_multiplier = beatsin88(147, 23, 60, ms);
        let hue_inc = beatsin88(113, 1, 3000, ms);

        let ms16 = ms as u16;
        let delta_ms = ms16.wrapping_sub(drift.last_ms);
        drift.last_ms = ms16;
        drift.pseudotime = drift
            .pseudotime
            .wrapping_add(delta_ms.wrapping_mul(ms_multiplier));
        let mut hue16 = drift.hue16;
        drift.hue16 = drift
            .hue16
            .wrapping_add(delta_ms.wrapping_mul(beatsin88(400, 5, 9, ms)));

        let mut theta = drift.pseudotime;
        let pixels = engine.strip_mut().pixels_mut();
        for pixel in pixels.iter_mut().rev() {
            hue16 = hue16.wrapping_add(hue_inc);
            let hue8 = (hue16 >> 8) as u8;

            theta = theta.wrapping_add(theta_inc);
            let wave = (i32::from(sin16(theta)) + 32768).clamp(0, 65535) as u32;
            let bri16 = (wave * wave) >> 16;
            let bri8 = ((bri16 * u32::from(bright_depth)) >> 16) as u8;
            let bri8 = bri8.saturating_add(255 - bright_depth);

            *pixel = blend_colors(*pixel, hsv(hue8, sat8, bri8), 64);
        }
    }
}

impl Effect for RainbowFade {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(Limits::duration(self.duration_ms));
        let mut pacer = FramePacer::new(self.frame);
        #[allow(clippy::cast_possible_truncation)]
        let mut drift = Drift {
            pseudotime: 0,
            last_ms: engine.now_ms() as u16,
            hue16: 0,
        };
        engine.strip_mut().reset_brightness();

        loop {
            Self::draw(engine, &mut drift);
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

/// Random speckles that pop in and fade out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confetti {
    pub duration_ms: u32,
    /// Speckle color; the rainbow marker follows the global hue
    pub color: Rgb,
    /// Fade applied to the whole strip every frame
    pub fade_by: u8,
    pub frame: Duration,
    pub hue_update_ms: u8,
}

impl Confetti {
    fn draw<D: OutputDriver, H: Host, const N: usize>(&self, engine: &mut Engine<'_, D, H, N>) {
        fade_to_black_by(engine.strip_mut().pixels_mut(), self.fade_by);

        let len = engine.strip().len();
        let index = engine.rng().index_below(len);
        let color = if is_rainbow(self.color) {
            let hue = engine.hue_tick();
            let spread = engine.rng().random8_below(64);
            hsv(hue.wrapping_add(spread), 200, 255)
        } else {
            self.color
        };
        if let Some(pixel) = engine.strip_mut().pixels_mut().get_mut(index) {
            *pixel = add_colors(*pixel, color);
        }
    }
}

impl Effect for Confetti {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(Limits::duration(self.duration_ms));
        let mut pacer = FramePacer::new(self.frame);
        engine.apply_hue_update(self.hue_update_ms);
        engine.strip_mut().reset_brightness();

        loop {
            self.draw(engine);
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
