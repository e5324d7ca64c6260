use core::num::NonZeroU8;

use embassy_time::Duration;

use crate::pixel_buffer::DEFAULT_INTENSITY;

/// Default prefix of every channel name
pub const DEFAULT_CHANNEL_PREFIX: &str = "crg/led";

/// Default interval between global hue steps
pub const DEFAULT_HUE_UPDATE_INTERVAL: Duration = Duration::from_millis(20);

/// Default longest single wait between cancellation checks
pub const DEFAULT_IDLE_SLICE: Duration = Duration::from_millis(1);

/// Per-node settings normally loaded from persistent storage
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig {
    /// This node's identifier; also keys its private channels
    pub node_id: NonZeroU8,
    /// Number of pixels on the strip
    pub led_count: usize,
    /// Brightness at boot and after a fade to zero
    pub default_intensity: u8,
    /// Interval between global hue steps
    pub hue_update_interval: Duration,
    /// Longest single wait before re-checking for a new command
    pub idle_slice: Duration,
    /// Prefix of every channel name
    pub channel_prefix: &'static str,
    /// Seed for sparkle and flash randomness
    pub rng_seed: u64,
}

impl NodeConfig {
    pub const fn new(node_id: NonZeroU8, led_count: usize) -> Self {
        Self {
            node_id,
            led_count,
            default_intensity: DEFAULT_INTENSITY,
            hue_update_interval: DEFAULT_HUE_UPDATE_INTERVAL,
            idle_slice: DEFAULT_IDLE_SLICE,
            channel_prefix: DEFAULT_CHANNEL_PREFIX,
            rng_seed: 0,
        }
    }

    #[must_use]
    pub const fn with_default_intensity(mut self, intensity: u8) -> Self {
        self.default_intensity = intensity;
        self
    }

    #[must_use]
    pub const fn with_hue_update_interval(mut self, interval: Duration) -> Self {
        self.hue_update_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_idle_slice(mut self, slice: Duration) -> Self {
        self.idle_slice = slice;
        self
    }

    #[must_use]
    pub const fn with_channel_prefix(mut self, prefix: &'static str) -> Self {
        self.channel_prefix = prefix;
        self
    }

    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub const fn node_id(&self) -> u8 {
        self.node_id.get()
    }
}
