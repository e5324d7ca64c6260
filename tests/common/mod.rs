//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use core::num::NonZeroU8;

use embassy_time::{Duration, Instant};
use myrtio_led_node::{
    CommandMailbox, Engine, Host, NodeConfig, OutputDriver, PixelBuffer, PublishOutbox, Rgb,
};

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

pub const MAX_LEDS: usize = 32;

/// One flushed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub pixels: Vec<Rgb>,
    pub brightness: u8,
}

/// Driver that keeps every frame written to it
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub frames: Vec<Frame>,
}

impl RecordingDriver {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, colors: &[Rgb], brightness: u8) {
        self.frames.push(Frame {
            pixels: colors.to_vec(),
            brightness,
        });
    }
}

/// Outbox that keeps every published message
#[derive(Debug, Default)]
pub struct RecordingOutbox {
    pub messages: Vec<(String, Vec<u8>)>,
}

impl RecordingOutbox {
    pub fn payload_text(&self, index: usize) -> &str {
        core::str::from_utf8(&self.messages[index].1).unwrap()
    }
}

impl PublishOutbox for RecordingOutbox {
    fn publish(&mut self, topic: &str, payload: &[u8]) {
        self.messages.push((topic.to_owned(), payload.to_vec()));
    }
}

/// Host with a virtual clock that jumps forward on every idle call
///
/// A payload can be scheduled to land in the mailbox at a virtual time or
/// after a number of idle calls, standing in for a message arriving while an
/// effect runs.
pub struct VirtualHost<'a> {
    now: Instant,
    mailbox: &'a CommandMailbox,
    scheduled: Option<(Trigger, Vec<u8>)>,
    pub idle_calls: usize,
    pub idle_time: Duration,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    At(Instant),
    AfterIdles(usize),
}

impl<'a> VirtualHost<'a> {
    pub fn new(mailbox: &'a CommandMailbox) -> Self {
        Self {
            now: Instant::from_millis(0),
            mailbox,
            scheduled: None,
            idle_calls: 0,
            idle_time: Duration::from_ticks(0),
        }
    }

    /// Post `payload` once the virtual clock reaches `ms`
    pub fn post_at(&mut self, ms: u64, payload: &[u8]) {
        self.scheduled = Some((Trigger::At(Instant::from_millis(ms)), payload.to_vec()));
    }

    /// Post `payload` during the `count`-th idle call
    pub fn post_after_idles(&mut self, count: usize, payload: &[u8]) {
        self.scheduled = Some((Trigger::AfterIdles(count), payload.to_vec()));
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.now.as_millis()
    }

    fn deliver(&mut self) {
        let due = match self.scheduled {
            Some((Trigger::At(at), _)) => self.now >= at,
            Some((Trigger::AfterIdles(count), _)) => self.idle_calls >= count,
            None => false,
        };
        if due {
            if let Some((_, payload)) = self.scheduled.take() {
                self.mailbox.post(&payload).unwrap();
            }
        }
    }
}

impl Host for VirtualHost<'_> {
    fn now(&self) -> Instant {
        self.now
    }

    async fn idle(&mut self, max: Duration) {
        self.idle_calls += 1;
        self.idle_time += max;
        self.now += max;
        self.deliver();
    }
}

pub type TestEngine<'a> = Engine<'a, RecordingDriver, VirtualHost<'a>, MAX_LEDS>;

pub fn config(node_id: u8, led_count: usize) -> NodeConfig {
    NodeConfig::new(NonZeroU8::new(node_id).unwrap(), led_count)
}

/// Engine over an initialized strip of `count` black pixels
pub fn new_engine(mailbox: &CommandMailbox, count: usize) -> TestEngine<'_> {
    let config = config(1, count);
    let mut strip = PixelBuffer::new(RecordingDriver::default());
    strip.initialize(count).unwrap();
    Engine::new(strip, VirtualHost::new(mailbox), mailbox, &config)
}

pub fn frames<'a>(engine: &'a TestEngine<'_>) -> &'a [Frame] {
    &engine.strip().driver().frames
}
