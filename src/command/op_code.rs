const OP_FILL: u8 = 0x01;
const OP_FILL_PATTERN: u8 = 0x02;
const OP_SET_PIXEL: u8 = 0x03;
const OP_SHOW: u8 = 0x04;
const OP_PATTERN: u8 = 0x11;
const OP_SCROLL: u8 = 0x12;
const OP_BOUNCE: u8 = 0x13;
const OP_MIDDLE: u8 = 0x14;
const OP_RANDOM_FLASH: u8 = 0x15;
const OP_FADE: u8 = 0x16;
const OP_STROBE: u8 = 0x17;
const OP_LIGHTNING: u8 = 0x18;
const OP_STACK: u8 = 0x19;
const OP_FILL_RANDOM: u8 = 0x1A;
const OP_WIPE: u8 = 0x1B;
const OP_RAINBOW: u8 = 0x20;
const OP_RAINBOW_FADE: u8 = 0x21;
const OP_CONFETTI: u8 = 0x22;
const OP_CYLON: u8 = 0x23;
const OP_BPM: u8 = 0x24;
const OP_JUGGLE: u8 = 0x25;
const OP_SET_HUE_UPDATE_TIME: u8 = 0x31;
const OP_SET_INTENSITY: u8 = 0x32;
const OP_COMPLETE: u8 = 0x5E;
const OP_ERROR: u8 = 0x5F;

/// Operation requested by a command
///
/// Every raw byte maps to a value: codes without a handler become
/// [`OpCode::Unknown`] and keep their raw value for logging and re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Fill,
    FillPattern,
    SetPixel,
    Show,
    Pattern,
    Scroll,
    Bounce,
    Middle,
    RandomFlash,
    Fade,
    Strobe,
    Lightning,
    Stack,
    FillRandom,
    Wipe,
    Rainbow,
    RainbowFade,
    Confetti,
    Cylon,
    Bpm,
    Juggle,
    SetHueUpdateTime,
    SetIntensity,
    Complete,
    Error,
    Unknown(u8),
}

impl OpCode {
    pub const fn from_raw(value: u8) -> Self {
        match value {
            OP_FILL => Self::Fill,
            OP_FILL_PATTERN => Self::FillPattern,
            OP_SET_PIXEL => Self::SetPixel,
            OP_SHOW => Self::Show,
            OP_PATTERN => Self::Pattern,
            OP_SCROLL => Self::Scroll,
            OP_BOUNCE => Self::Bounce,
            OP_MIDDLE => Self::Middle,
            OP_RANDOM_FLASH => Self::RandomFlash,
            OP_FADE => Self::Fade,
            OP_STROBE => Self::Strobe,
            OP_LIGHTNING => Self::Lightning,
            OP_STACK => Self::Stack,
            OP_FILL_RANDOM => Self::FillRandom,
            OP_WIPE => Self::Wipe,
            OP_RAINBOW => Self::Rainbow,
            OP_RAINBOW_FADE => Self::RainbowFade,
            OP_CONFETTI => Self::Confetti,
            OP_CYLON => Self::Cylon,
            OP_BPM => Self::Bpm,
            OP_JUGGLE => Self::Juggle,
            OP_SET_HUE_UPDATE_TIME => Self::SetHueUpdateTime,
            OP_SET_INTENSITY => Self::SetIntensity,
            OP_COMPLETE => Self::Complete,
            OP_ERROR => Self::Error,
            other => Self::Unknown(other),
        }
    }

    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Fill => OP_FILL,
            Self::FillPattern => OP_FILL_PATTERN,
            Self::SetPixel => OP_SET_PIXEL,
            Self::Show => OP_SHOW,
            Self::Pattern => OP_PATTERN,
            Self::Scroll => OP_SCROLL,
            Self::Bounce => OP_BOUNCE,
            Self::Middle => OP_MIDDLE,
            Self::RandomFlash => OP_RANDOM_FLASH,
            Self::Fade => OP_FADE,
            Self::Strobe => OP_STROBE,
            Self::Lightning => OP_LIGHTNING,
            Self::Stack => OP_STACK,
            Self::FillRandom => OP_FILL_RANDOM,
            Self::Wipe => OP_WIPE,
            Self::Rainbow => OP_RAINBOW,
            Self::RainbowFade => OP_RAINBOW_FADE,
            Self::Confetti => OP_CONFETTI,
            Self::Cylon => OP_CYLON,
            Self::Bpm => OP_BPM,
            Self::Juggle => OP_JUGGLE,
            Self::SetHueUpdateTime => OP_SET_HUE_UPDATE_TIME,
            Self::SetIntensity => OP_SET_INTENSITY,
            Self::Complete => OP_COMPLETE,
            Self::Error => OP_ERROR,
            Self::Unknown(raw) => raw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "FILL",
            Self::FillPattern => "FILL_PATTERN",
            Self::SetPixel => "SET_PIXEL",
            Self::Show => "SHOW",
            Self::Pattern => "PATTERN",
            Self::Scroll => "SCROLL",
            Self::Bounce => "BOUNCE",
            Self::Middle => "MIDDLE",
            Self::RandomFlash => "RANDOM_FLASH",
            Self::Fade => "FADE",
            Self::Strobe => "STROBE",
            Self::Lightning => "LIGHTNING",
            Self::Stack => "STACK",
            Self::FillRandom => "FILL_RANDOM",
            Self::Wipe => "WIPE",
            Self::Rainbow => "RAINBOW",
            Self::RainbowFade => "RAINBOW_FADE",
            Self::Confetti => "CONFETTI",
            Self::Cylon => "CYLON",
            Self::Bpm => "BPM",
            Self::Juggle => "JUGGLE",
            Self::SetHueUpdateTime => "SET_HUE_UPDATE_TIME",
            Self::SetIntensity => "SET_INTENSITY",
            Self::Complete => "COMPLETE",
            Self::Error => "ERROR",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl Default for OpCode {
    /// A missing `cmd` key decodes as raw 0
    fn default() -> Self {
        Self::from_raw(0)
    }
}
