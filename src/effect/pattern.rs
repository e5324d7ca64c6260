//! Bit-pattern effects: static fill, rotation, scrolling and bouncing.
//!
//! A pattern is a byte painted least significant bit first: bit `k` lights
//! pixel `start + k` with the on-color, a clear bit paints the off-color.

use super::{Effect, Horizontal, Limits, pattern_color};
use crate::OutputDriver;
use crate::color::Rgb;
use crate::engine::{Engine, Step, proceed};
use crate::host::Host;
use crate::pixel_buffer::PixelBuffer;

/// Paint `length` pixels from `start`, repeating the pattern every `period`
/// pixels. Pixels outside the strip are skipped.
fn paint_pattern<D: OutputDriver, const N: usize>(
    strip: &mut PixelBuffer<D, N>,
    start: i32,
    length: i32,
    pattern: u8,
    period: u8,
    on: Rgb,
    off: Rgb,
) {
    let period = i32::from(period.max(1));
    for offset in 0..length {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bit = (offset % period) as u8;
        strip.set(start + offset, pattern_color(pattern, bit, on, off), false);
    }
}

/// Paint the pattern over the whole strip, repeating every 8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPattern {
    pub pattern: u8,
    pub on: Rgb,
    pub off: Rgb,
}

impl Effect for FillPattern {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.len();
        let strip = engine.strip_mut();
        strip.reset_brightness();
        paint_pattern(strip, 0, len, self.pattern, 8, self.on, self.off);
        strip.show();
        Ok(())
    }
}

/// Repaint the pattern every `pattern_length` pixels and rotate it by one
/// bit each cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatePattern {
    pub limits: Limits,
    pub pattern: u8,
    pub pattern_length: u8,
    pub direction: Horizontal,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
}

impl Effect for RotatePattern {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        let mut pattern = self.pattern;
        engine.strip_mut().reset_brightness();

        loop {
            let len = engine.len();
            let strip = engine.strip_mut();
            paint_pattern(
                strip,
                0,
                len,
                pattern,
                self.pattern_length,
                self.on,
                self.off,
            );
            strip.show();
            if !proceed(engine.pause(self.on_time_ms).await)? {
                break;
            }

            pattern = match self.direction {
                Horizontal::Left => pattern.rotate_left(1),
                Horizontal::Right => pattern.rotate_right(1),
            };

            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}

/// Walk the pattern onto, across and off the strip
///
/// The leading edge is bit 0. Moving left the pattern enters at index 0 and
/// travels up; moving right it enters at the last pixel and travels down.
/// Pixels falling outside the strip are clipped at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scroll {
    pub limits: Limits,
    pub pattern: u8,
    pub pattern_length: u8,
    pub direction: Horizontal,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub clear_after: bool,
    pub clear_end: bool,
}

impl Scroll {
    async fn sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.len();
        let pattern_len = i32::from(self.pattern_length);

        for step in 0..(len + pattern_len - 1) {
            let strip = engine.strip_mut();
            for bit in 0..self.pattern_length {
                let offset = i32::from(bit);
                let index = match self.direction {
                    Horizontal::Left => step - offset,
                    Horizontal::Right => (len - 1 - step) + offset,
                };
                strip.set(index, pattern_color(self.pattern, bit, self.on, self.off), false);
            }
            strip.show();
            engine.pause(self.on_time_ms).await?;
            if self.clear_after {
                engine.strip_mut().fill(self.off, false);
            }
        }
        Ok(())
    }
}

impl Effect for Scroll {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            if !proceed(self.sweep(engine).await)? {
                break;
            }
            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }

        if self.clear_end {
            engine.strip_mut().fill(self.off, true);
        }
        Ok(())
    }
}

/// Scroll the pattern to one end and back
///
/// Every reflection point is drawn once: the first pass covers both ends,
/// later passes skip the pixel where the previous sweep stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounce {
    pub limits: Limits,
    pub pattern: u8,
    pub pattern_length: u8,
    pub direction: Horizontal,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
    pub bounce_time_ms: u32,
    pub clear_after: bool,
    pub clear_end: bool,
}

/// Inclusive start positions of the two sweeps of one bounce
#[derive(Debug, Clone, Copy)]
struct BounceRange {
    up_start: i32,
    up_end: i32,
    down_start: i32,
}

impl Bounce {
    fn ranges(&self, len: i32, first: bool) -> BounceRange {
        let last = len - i32::from(self.pattern_length);
        match (self.direction, first) {
            (Horizontal::Left, true) => BounceRange {
                up_start: 0,
                up_end: last,
                down_start: last - 1,
            },
            (Horizontal::Left, false) => BounceRange {
                up_start: 1,
                up_end: last - 1,
                down_start: last,
            },
            (Horizontal::Right, true) => BounceRange {
                up_start: 1,
                up_end: last,
                down_start: last,
            },
            (Horizontal::Right, false) => BounceRange {
                up_start: 1,
                up_end: last,
                down_start: last - 1,
            },
        }
    }

    async fn step<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        position: i32,
    ) -> Step {
        let pattern_len = i32::from(self.pattern_length);
        let strip = engine.strip_mut();
        paint_pattern(
            strip,
            position,
            pattern_len,
            self.pattern,
            self.pattern_length,
            self.on,
            self.off,
        );
        strip.show();
        engine.pause(self.on_time_ms).await?;
        if self.clear_after {
            engine.strip_mut().fill(self.off, true);
            engine.pause(self.off_time_ms).await?;
        }
        Ok(())
    }

    async fn end_of_sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        if self.clear_end {
            engine.strip_mut().fill(self.off, true);
            engine.pause(self.bounce_time_ms).await?;
        }
        Ok(())
    }

    async fn sweep_up<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        range: BounceRange,
    ) -> Step {
        for position in range.up_start..=range.up_end {
            self.step(engine, position).await?;
        }
        self.end_of_sweep(engine).await
    }

    async fn sweep_down<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        range: BounceRange,
    ) -> Step {
        for position in (0..=range.down_start).rev() {
            self.step(engine, position).await?;
        }
        self.end_of_sweep(engine).await
    }

    async fn bounce<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        first: bool,
    ) -> Step {
        let range = self.ranges(engine.len(), first);
        match self.direction {
            Horizontal::Left => {
                self.sweep_up(engine, range).await?;
                self.sweep_down(engine, range).await
            }
            Horizontal::Right => {
                self.sweep_down(engine, range).await?;
                self.sweep_up(engine, range).await
            }
        }
    }
}

impl Effect for Bounce {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        let mut first = true;
        loop {
            if !proceed(self.bounce(engine, first).await)? {
                break;
            }
            first = false;
            engine.checkpoint().await?;
            if cycles.finish(engine.now()) {
                break;
            }
        }
        Ok(())
    }
}
