use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::{Command, MAX_RELAY_NODES, OpCode, RelayChain, STATUS_SUCCESS};
use crate::color::{rgb_from_u32, rgb_to_u32};
use crate::error::{DecodeError, EncodeError};
use crate::mailbox::COMMAND_BUFFER_SIZE;

/// Encoded command ready to publish
pub type CommandBuffer = Vec<u8, COMMAND_BUFFER_SIZE>;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u8) -> bool {
    *value == 0
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct WireCommand {
    cmd: u8,
    uid: u32,
    nid: u8,
    noc: u8,
    rly: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    rn: Option<Vec<u8, MAX_RELAY_NODES>>,
    s: u8,
    fps: u8,
    udtime: u8,
    i: u8,
    idx: u8,
    p: u8,
    pl: u8,
    d: u32,
    r: u16,
    dir: u8,
    fb: u8,
    pwin: u8,
    ca: u8,
    ce: u8,
    onc: u32,
    offc: u32,
    ont: u32,
    offt: u32,
    bt: u32,
    ft: u32,
    fi: u8,
    #[serde(skip_serializing_if = "is_zero")]
    st: u8,
}

#[derive(Serialize)]
struct WireResponse {
    cmd: u8,
    nid: u8,
    uid: u32,
    st: u8,
}

impl From<WireCommand> for Command {
    fn from(wire: WireCommand) -> Self {
        Self {
            op: OpCode::from_raw(wire.cmd),
            uid: wire.uid,
            node_id: wire.nid,
            notify: wire.noc != 0,
            relay: wire.rly != 0,
            relay_chain: wire.rn.map(RelayChain::from_vec).unwrap_or_default(),
            show: wire.s != 0,
            fps: wire.fps,
            hue_update_ms: wire.udtime,
            intensity: wire.i,
            index: wire.idx,
            pattern: wire.p,
            pattern_length: wire.pl,
            duration_ms: wire.d,
            repeat: wire.r,
            direction: wire.dir,
            fade_by: wire.fb,
            probability: wire.pwin,
            clear_after: wire.ca != 0,
            clear_end: wire.ce != 0,
            on_color: rgb_from_u32(wire.onc),
            off_color: rgb_from_u32(wire.offc),
            on_time_ms: wire.ont,
            off_time_ms: wire.offt,
            bounce_time_ms: wire.bt,
            fade_time_ms: wire.ft,
            fade_increment: wire.fi,
            status: wire.st,
        }
    }
}

impl From<&Command> for WireCommand {
    fn from(cmd: &Command) -> Self {
        Self {
            cmd: cmd.op.as_raw(),
            uid: cmd.uid,
            nid: cmd.node_id,
            noc: u8::from(cmd.notify),
            rly: u8::from(cmd.relay),
            rn: cmd.relay.then(|| cmd.relay_chain.as_vec().clone()),
            s: u8::from(cmd.show),
            fps: cmd.fps,
            udtime: cmd.hue_update_ms,
            i: cmd.intensity,
            idx: cmd.index,
            p: cmd.pattern,
            pl: cmd.pattern_length,
            d: cmd.duration_ms,
            r: cmd.repeat,
            dir: cmd.direction,
            fb: cmd.fade_by,
            pwin: cmd.probability,
            ca: u8::from(cmd.clear_after),
            ce: u8::from(cmd.clear_end),
            onc: rgb_to_u32(cmd.on_color),
            offc: rgb_to_u32(cmd.off_color),
            ont: cmd.on_time_ms,
            offt: cmd.off_time_ms,
            bt: cmd.bounce_time_ms,
            ft: cmd.fade_time_ms,
            fi: cmd.fade_increment,
            st: cmd.status,
        }
    }
}

/// Copy `payload`, turning bare `true`/`false` literals into `1`/`0`.
///
/// Flags travel as integers or booleans depending on the sender, and
/// `serde-json-core` cannot deserialize a field that may be either. String
/// contents are left alone. The output is never longer than the input.
fn numeric_literals(payload: &[u8]) -> Result<CommandBuffer, DecodeError> {
    let mut out = CommandBuffer::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = payload;

    while let Some((&byte, tail)) = rest.split_first() {
        let (emit, next) = if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            (byte, tail)
        } else if rest.starts_with(b"true") {
            (b'1', &rest[4..])
        } else if rest.starts_with(b"false") {
            (b'0', &rest[5..])
        } else {
            in_string = byte == b'"';
            (byte, tail)
        };
        out.push(emit).map_err(|_| DecodeError::Malformed)?;
        rest = next;
    }
    Ok(out)
}

/// Parse a compact JSON object into a command.
///
/// Absent keys read as zero and flags accept `true`/`false` as well as
/// integers (non-zero is true). Anything that is not a single well-formed
/// object with fields of the expected types is rejected as a whole, as is a
/// payload longer than the command buffer.
pub fn decode(payload: &[u8]) -> Result<Command, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }
    let normalized = numeric_literals(payload)?;
    let (wire, _) = serde_json_core::from_slice::<WireCommand>(&normalized)
        .map_err(|_| DecodeError::Malformed)?;
    Ok(wire.into())
}

/// Serialize every field of a command; `rn` is only written when relaying.
pub fn encode(command: &Command) -> Result<CommandBuffer, EncodeError> {
    serde_json_core::to_vec(&WireCommand::from(command)).map_err(|_| EncodeError)
}

/// Serialize the completion response for a processed command
pub fn encode_response(command: &Command) -> Result<CommandBuffer, EncodeError> {
    let response = WireResponse {
        cmd: OpCode::Complete.as_raw(),
        nid: command.node_id,
        uid: command.uid,
        st: STATUS_SUCCESS,
    };
    serde_json_core::to_vec(&response).map_err(|_| EncodeError)
}
