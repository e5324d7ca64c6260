//! Pixel-by-pixel sweeps: wipe, middle, stack and random fill.

use heapless::Vec;

use super::{Effect, Horizontal, Limits, Radial, Vertical};
use crate::OutputDriver;
use crate::color::{Rgb, hsv, is_rainbow};
use crate::engine::{Engine, Step, proceed};
use crate::host::Host;

/// Random fully saturated color for the rainbow marker, else `color`
fn pick_color<D: OutputDriver, H: Host, const N: usize>(
    engine: &mut Engine<'_, D, H, N>,
    color: Rgb,
) -> Rgb {
    if is_rainbow(color) {
        let hue = engine.rng().random8();
        hsv(hue, 255, 255)
    } else {
        color
    }
}

/// Light pixels one at a time from one end to the other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wipe {
    pub limits: Limits,
    pub direction: Horizontal,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
    pub clear_after: bool,
    pub clear_end: bool,
}

impl Wipe {
    async fn sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.len();
        for step in 0..len {
            let index = match self.direction {
                Horizontal::Left => step,
                Horizontal::Right => len - 1 - step,
            };
            engine.strip_mut().set(index, self.on, true);
            engine.pause(self.on_time_ms).await?;
            if self.clear_after {
                engine.strip_mut().set(index, self.off, true);
                engine.pause(self.off_time_ms).await?;
            }
        }
        Ok(())
    }
}

impl Effect for Wipe {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            let expired = !proceed(self.sweep(engine).await)?;
            if self.clear_end {
                engine.strip_mut().fill(self.off, true);
            }
            if expired {
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

/// Light symmetric pairs from the ends to the center or from the center out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Middle {
    pub limits: Limits,
    pub direction: Radial,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
    pub clear_after: bool,
    pub clear_end: bool,
}

impl Middle {
    async fn pair<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        a: i32,
        b: i32,
    ) -> Step {
        let strip = engine.strip_mut();
        strip.set(a, self.on, false);
        strip.set(b, self.on, true);
        engine.pause(self.on_time_ms).await?;

        if self.clear_after {
            let strip = engine.strip_mut();
            strip.set(a, self.off, false);
            strip.set(b, self.off, true);
            engine.pause(self.off_time_ms).await?;
        }
        Ok(())
    }

    async fn sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.len();
        let half = len / 2;
        match self.direction {
            Radial::In => {
                for i in 0..half {
                    self.pair(engine, i, len - 1 - i).await?;
                }
            }
            Radial::Out => {
                for i in 0..=half {
                    self.pair(engine, half - i, half + i).await?;
                }
            }
        }
        Ok(())
    }
}

impl Effect for Middle {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            let expired = !proceed(self.sweep(engine).await)?;
            if self.clear_end {
                engine.strip_mut().fill(self.off, true);
            }
            if expired {
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

/// Drop pixels in from the far end until they pile up at the near end
///
/// Down stacks against index 0, up against the last pixel. A rainbow
/// on-color gives every drop a random hue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub limits: Limits,
    pub direction: Vertical,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub clear_end: bool,
}

impl Stack {
    async fn flash<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
        index: i32,
    ) -> Step {
        let color = pick_color(engine, self.on);
        engine.strip_mut().set(index, color, true);
        engine.pause(self.on_time_ms).await?;
        engine.strip_mut().set(index, self.off, true);
        Ok(())
    }

    async fn sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let len = engine.len();
        for settled in 0..len {
            let target = match self.direction {
                Vertical::Down => {
                    for index in ((settled + 1)..len).rev() {
                        self.flash(engine, index).await?;
                    }
                    settled
                }
                Vertical::Up => {
                    let target = len - 1 - settled;
                    for index in 0..target {
                        self.flash(engine, index).await?;
                    }
                    target
                }
            };
            let color = pick_color(engine, self.on);
            engine.strip_mut().set(target, color, true);
        }
        Ok(())
    }
}

impl Effect for Stack {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            let expired = !proceed(self.sweep(engine).await)?;
            if self.clear_end {
                engine.strip_mut().fill(self.off, true);
            }
            if expired {
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

/// Light every pixel once per cycle in random order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRandom {
    pub limits: Limits,
    pub on: Rgb,
    pub off: Rgb,
    pub on_time_ms: u32,
    pub off_time_ms: u32,
    pub clear_after: bool,
    pub clear_end: bool,
}

impl FillRandom {
    async fn sweep<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut remaining: Vec<i32, N> = (0..engine.len()).collect();

        while !remaining.is_empty() {
            let pick = engine.rng().index_below(remaining.len());
            let index = remaining.swap_remove(pick);
            let color = pick_color(engine, self.on);

            engine.strip_mut().set(index, color, true);
            engine.pause(self.on_time_ms).await?;
            if self.clear_after {
                engine.strip_mut().set(index, self.off, true);
                engine.pause(self.off_time_ms).await?;
            }
        }
        Ok(())
    }
}

impl Effect for FillRandom {
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        let mut cycles = engine.begin(self.limits);
        engine.strip_mut().fill(self.off, true);

        loop {
            let expired = !proceed(self.sweep(engine).await)?;
            if self.clear_end {
                engine.strip_mut().fill(self.off, true);
            }
            if expired {
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
