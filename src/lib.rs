#![no_std]

pub mod color;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod effect;
pub mod engine;
pub mod error;
pub mod frame_scheduler;
pub mod host;
pub mod hue;
pub mod mailbox;
pub mod math8;
pub mod pixel_buffer;
pub mod random;
pub mod status;
pub mod topic;

pub use command::{Command, OpCode, RelayChain, decode, encode, encode_response};
pub use config::NodeConfig;
pub use dispatcher::{Dispatcher, DispatcherState, Report, accept_message};
pub use effect::EffectSlot;
pub use engine::{Engine, Outcome};
pub use error::Error;
pub use frame_scheduler::FramePacer;
pub use host::{Host, PublishOutbox};
pub use mailbox::CommandMailbox;
pub use pixel_buffer::PixelBuffer;
pub use status::{Heartbeat, StatusCell, StatusState};
pub use topic::Topics;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The node is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip, scaled by the global `brightness`
    fn write(&mut self, colors: &[Rgb], brightness: u8);
}

/// [`OutputDriver`] for any `smart-leds` writer
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    fn write(&mut self, colors: &[Rgb], brightness: u8) {
        let scaled = smart_leds::brightness(colors.iter().copied(), brightness);
        if let Err(err) = self.writer.write(scaled) {
            log::warn!("strip write failed: {:?}", err);
        }
    }
}

/// Route the `log` facade to the serial console
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
