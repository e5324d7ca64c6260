//! Typed command record and its compact JSON wire form.
//!
//! One flat record covers every operation; each operation reads the subset
//! of fields it needs. Missing keys decode as zero, so "unset" and "zero"
//! are the same thing on the wire (node id 0 therefore means "this node").

mod op_code;
mod relay;
mod wire;

pub use op_code::OpCode;
pub use relay::{MAX_RELAY_NODES, RelayChain};
pub use wire::{CommandBuffer, decode, encode, encode_response};

use crate::color::Rgb;

/// Status reported in a completion response
pub const STATUS_SUCCESS: u8 = 0x01;
/// Status reported when a command failed
pub const STATUS_ERROR: u8 = 0x10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Requested operation (`cmd`)
    pub op: OpCode,
    /// Correlation id echoed in the completion response (`uid`)
    pub uid: u32,
    /// Destination node, 0 = this node (`nid`)
    pub node_id: u8,
    /// Publish a completion response when done (`noc`)
    pub notify: bool,
    /// Forward to the next hop of `relay_chain` when done (`rly`)
    pub relay: bool,
    /// Remaining hops (`rn`)
    pub relay_chain: RelayChain,
    /// Flush to the strip immediately (`s`)
    pub show: bool,
    /// Frames per second (`fps`)
    pub fps: u8,
    /// Global hue step interval in ms, 0 = keep current (`udtime`)
    pub hue_update_ms: u8,
    /// Global brightness (`i`)
    pub intensity: u8,
    /// Pixel index (`idx`)
    pub index: u8,
    /// Pattern bits, least significant bit first (`p`)
    pub pattern: u8,
    /// Pattern period in pixels, 0 = 8 (`pl`)
    pub pattern_length: u8,
    /// Duration ceiling in ms, 0 = unbounded (`d`)
    pub duration_ms: u32,
    /// Cycle count, 0 = unbounded (`r`)
    pub repeat: u16,
    /// Raw direction, 0 = left/down/in, 1 = right/up/out (`dir`)
    pub direction: u8,
    /// Per-frame fade amount (`fb`)
    pub fade_by: u8,
    /// Probability on a 0-255 scale (`pwin`)
    pub probability: u8,
    /// Turn pixels off again after each step (`ca`)
    pub clear_after: bool,
    /// Turn the strip off at the end of each cycle (`ce`)
    pub clear_end: bool,
    /// Primary color (`onc`)
    pub on_color: Rgb,
    /// Background color (`offc`)
    pub off_color: Rgb,
    /// On time in ms (`ont`)
    pub on_time_ms: u32,
    /// Off time in ms (`offt`)
    pub off_time_ms: u32,
    /// Pause at each bounce end in ms (`bt`)
    pub bounce_time_ms: u32,
    /// Fade step time in ms (`ft`)
    pub fade_time_ms: u32,
    /// Fade step size (`fi`)
    pub fade_increment: u8,
    /// Completion status, only set on responses (`st`)
    pub status: u8,
}

impl Command {
    /// Create an otherwise empty command for `op`
    pub fn new(op: OpCode) -> Self {
        Self {
            op,
            ..Self::default()
        }
    }

    /// Consume the head of the relay chain. No-op on an empty chain.
    pub fn shift_relay_chain(&mut self) {
        self.relay_chain.shift();
    }
}
