//! Effect system with compile-time known effect variants
//!
//! Every operation a command can request maps to one variant of
//! [`EffectSlot`], holding that effect's parameters. Each effect implements
//! the `Effect` trait and renders through the [`Engine`], which owns the
//! strip, the clock and the cancellation check.

mod beat;
mod flash;
mod pattern;
mod rainbow;
mod sweep;

pub use beat::{Bpm, Cylon, Juggle};
pub use flash::{Fade, Lightning, RandomFlash, Strobe};
pub use pattern::{Bounce, FillPattern, RotatePattern, Scroll};
pub use rainbow::{Confetti, Rainbow, RainbowFade};
pub use sweep::{FillRandom, Middle, Stack, Wipe};

use embassy_time::Duration;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::command::{Command, OpCode};
use crate::engine::{Engine, Step};
use crate::error::UnknownOperation;
use crate::frame_scheduler::frame_duration;
use crate::host::Host;

/// Pattern period used when a command leaves `pl` unset
pub const DEFAULT_PATTERN_LENGTH: u8 = 8;

pub(crate) trait Effect {
    /// Render until the effect ends, is cancelled or expires
    async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step;
}

/// Repeat count and duration ceiling; zero means unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub repeat: u16,
    pub duration_ms: u32,
}

impl Limits {
    pub const fn new(repeat: u16, duration_ms: u32) -> Self {
        Self {
            repeat,
            duration_ms,
        }
    }

    /// Duration ceiling only
    pub const fn duration(duration_ms: u32) -> Self {
        Self::new(0, duration_ms)
    }
}

/// Left/right on the wire: 0 = left, anything else = right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Down/up on the wire: 0 = down, anything else = up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Down,
    Up,
}

/// In/out on the wire: 0 = in, anything else = out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radial {
    In,
    Out,
}

impl Horizontal {
    pub const fn from_raw(value: u8) -> Self {
        if value == 0 { Self::Left } else { Self::Right }
    }
}

impl Vertical {
    pub const fn from_raw(value: u8) -> Self {
        if value == 0 { Self::Down } else { Self::Up }
    }
}

impl Radial {
    pub const fn from_raw(value: u8) -> Self {
        if value == 0 { Self::In } else { Self::Out }
    }
}

/// Pattern period with 0 treated as [`DEFAULT_PATTERN_LENGTH`]
pub(crate) const fn pattern_length(raw: u8) -> u8 {
    if raw == 0 { DEFAULT_PATTERN_LENGTH } else { raw }
}

/// Color of pattern bit `bit`; bits past the eighth are always off
pub(crate) const fn pattern_color(pattern: u8, bit: u8, on: Rgb, off: Rgb) -> Rgb {
    if bit < 8 && (pattern >> bit) & 0x01 != 0 {
        on
    } else {
        off
    }
}

/// Frame delay of the procedural effects: `ont` when set, else from `fps`
fn frame_of(command: &Command) -> Duration {
    if command.on_time_ms > 0 {
        Duration::from_millis(u64::from(command.on_time_ms))
    } else {
        frame_duration(command.fps)
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectSlot {
    /// Flush the buffer as is
    Show,
    /// Write one pixel
    SetPixel { index: u8, color: Rgb, show: bool },
    /// Write every pixel; a `FILL` command always flushes
    Fill { color: Rgb, show: bool },
    FillPattern(FillPattern),
    Pattern(RotatePattern),
    Wipe(Wipe),
    Scroll(Scroll),
    Bounce(Bounce),
    Middle(Middle),
    RandomFlash(RandomFlash),
    Fade(Fade),
    Strobe(Strobe),
    Lightning(Lightning),
    Stack(Stack),
    FillRandom(FillRandom),
    Rainbow(Rainbow),
    RainbowFade(RainbowFade),
    Confetti(Confetti),
    Cylon(Cylon),
    Bpm(Bpm),
    Juggle(Juggle),
    /// Set global brightness
    SetIntensity(u8),
    /// Set the global hue step interval in ms; 0 is ignored
    SetHueUpdateTime(u8),
    /// Completion echo, nothing to render
    Complete,
}

impl EffectSlot {
    /// Route a command to its effect
    ///
    /// `ERROR` and unassigned codes have no effect and are reported back.
    #[allow(clippy::too_many_lines)]
    pub fn from_command(command: &Command) -> Result<Self, UnknownOperation> {
        let limits = Limits::new(command.repeat, command.duration_ms);
        let on = command.on_color;
        let off = command.off_color;

        Ok(match command.op {
            OpCode::Show => Self::Show,
            OpCode::SetPixel => Self::SetPixel {
                index: command.index,
                color: on,
                show: command.show,
            },
            OpCode::Fill => Self::Fill {
                color: on,
                show: true,
            },
            OpCode::FillPattern => Self::FillPattern(FillPattern {
                pattern: command.pattern,
                on,
                off,
            }),
            OpCode::Pattern => Self::Pattern(RotatePattern {
                limits,
                pattern: command.pattern,
                pattern_length: pattern_length(command.pattern_length),
                direction: Horizontal::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
            }),
            OpCode::Wipe => Self::Wipe(Wipe {
                limits,
                direction: Horizontal::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
                clear_after: command.clear_after,
                clear_end: command.clear_end,
            }),
            OpCode::Scroll => Self::Scroll(Scroll {
                limits,
                pattern: command.pattern,
                pattern_length: pattern_length(command.pattern_length),
                direction: Horizontal::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
                clear_after: command.clear_after,
                clear_end: command.clear_end,
            }),
            OpCode::Bounce => Self::Bounce(Bounce {
                limits,
                pattern: command.pattern,
                pattern_length: pattern_length(command.pattern_length),
                direction: Horizontal::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
                bounce_time_ms: command.bounce_time_ms,
                clear_after: command.clear_after,
                clear_end: command.clear_end,
            }),
            OpCode::Middle => Self::Middle(Middle {
                limits,
                direction: Radial::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
                clear_after: command.clear_after,
                clear_end: command.clear_end,
            }),
            OpCode::RandomFlash => Self::RandomFlash(RandomFlash {
                limits,
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
            }),
            OpCode::Fade => Self::Fade(Fade {
                direction: Vertical::from_raw(command.direction),
                increment: command.fade_increment.max(1),
                step_ms: command.fade_time_ms,
                color: on,
            }),
            OpCode::Strobe => Self::Strobe(Strobe {
                limits,
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
            }),
            OpCode::Lightning => Self::Lightning(Lightning { limits, on, off }),
            OpCode::Stack => Self::Stack(Stack {
                limits,
                direction: Vertical::from_raw(command.direction),
                on,
                off,
                on_time_ms: command.on_time_ms,
                clear_end: command.clear_end,
            }),
            OpCode::FillRandom => Self::FillRandom(FillRandom {
                limits,
                on,
                off,
                on_time_ms: command.on_time_ms,
                off_time_ms: command.off_time_ms,
                clear_after: command.clear_after,
                clear_end: command.clear_end,
            }),
            OpCode::Rainbow => Self::Rainbow(Rainbow {
                duration_ms: command.duration_ms,
                glitter_probability: command.probability,
                glitter: on,
                frame: frame_of(command),
                hue_update_ms: command.hue_update_ms,
            }),
            OpCode::RainbowFade => Self::RainbowFade(RainbowFade {
                duration_ms: command.duration_ms,
                frame: frame_of(command),
            }),
            OpCode::Confetti => Self::Confetti(Confetti {
                duration_ms: command.duration_ms,
                color: on,
                fade_by: command.fade_by,
                frame: frame_of(command),
                hue_update_ms: command.hue_update_ms,
            }),
            OpCode::Cylon => Self::Cylon(Cylon {
                limits,
                color: on,
                frame_ms: command.fade_time_ms,
                bpm: command.fps.max(1),
                hue_update_ms: command.hue_update_ms,
            }),
            OpCode::Bpm => Self::Bpm(Bpm {
                duration_ms: command.duration_ms,
                frame: frame_of(command),
                hue_update_ms: command.hue_update_ms,
            }),
            OpCode::Juggle => Self::Juggle(Juggle {
                duration_ms: command.duration_ms,
                frame: frame_of(command),
            }),
            OpCode::SetIntensity => Self::SetIntensity(command.intensity),
            OpCode::SetHueUpdateTime => Self::SetHueUpdateTime(command.hue_update_ms),
            OpCode::Complete => Self::Complete,
            OpCode::Error | OpCode::Unknown(_) => {
                return Err(UnknownOperation(command.op.as_raw()));
            }
        })
    }

    /// Render the effect through `engine`
    pub(crate) async fn render<D: OutputDriver, H: Host, const N: usize>(
        &self,
        engine: &mut Engine<'_, D, H, N>,
    ) -> Step {
        match self {
            Self::Show => {
                engine.strip_mut().show();
                Ok(())
            }
            Self::SetPixel { index, color, show } => {
                engine.strip_mut().set(i32::from(*index), *color, *show);
                Ok(())
            }
            Self::Fill { color, show } => {
                engine.strip_mut().fill(*color, *show);
                Ok(())
            }
            Self::SetIntensity(intensity) => {
                engine.strip_mut().set_brightness(*intensity);
                Ok(())
            }
            Self::SetHueUpdateTime(interval_ms) => {
                engine.apply_hue_update(*interval_ms);
                Ok(())
            }
            Self::Complete => Ok(()),
            Self::FillPattern(effect) => effect.render(engine).await,
            Self::Pattern(effect) => effect.render(engine).await,
            Self::Wipe(effect) => effect.render(engine).await,
            Self::Scroll(effect) => effect.render(engine).await,
            Self::Bounce(effect) => effect.render(engine).await,
            Self::Middle(effect) => effect.render(engine).await,
            Self::RandomFlash(effect) => effect.render(engine).await,
            Self::Fade(effect) => effect.render(engine).await,
            Self::Strobe(effect) => effect.render(engine).await,
            Self::Lightning(effect) => effect.render(engine).await,
            Self::Stack(effect) => effect.render(engine).await,
            Self::FillRandom(effect) => effect.render(engine).await,
            Self::Rainbow(effect) => effect.render(engine).await,
            Self::RainbowFade(effect) => effect.render(engine).await,
            Self::Confetti(effect) => effect.render(engine).await,
            Self::Cylon(effect) => effect.render(engine).await,
            Self::Bpm(effect) => effect.render(engine).await,
            Self::Juggle(effect) => effect.render(engine).await,
        }
    }
}
