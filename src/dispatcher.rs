//! Command dispatcher: mailbox to effect, then completion and relay.
//!
//! The dispatcher owns the [`Engine`] and the outbound [`PublishOutbox`].
//! Its loop takes one payload at a time from the [`CommandMailbox`], decodes
//! it, runs the matching effect and, once the effect returns, publishes the
//! completion response and forwards the command along its relay chain.
//!
//! ```text
//! Idle --payload--> Dispatching --effect done--> Relaying --> Idle
//!                        |
//!                        +--decode error------------------> Idle
//! ```

use log::{debug, error, info, warn};

use crate::OutputDriver;
use crate::color::Rgb;
use crate::command::{Command, decode, encode, encode_response};
use crate::config::NodeConfig;
use crate::effect::EffectSlot;
use crate::engine::{Engine, Outcome};
use crate::error::{
    AllocationError, DecodeError, MailboxOverrun, RelayError, TopicOverflow, UnknownOperation,
};
use crate::host::{Host, PublishOutbox};
use crate::mailbox::CommandMailbox;
use crate::pixel_buffer::PixelBuffer;
use crate::status::{StatusCell, StatusState};
use crate::topic::Topics;

/// Hold time of each boot self-test color
const SELF_TEST_HOLD_MS: u32 = 250;

const SELF_TEST_COLORS: [Rgb; 4] = [
    Rgb::new(255, 255, 255),
    Rgb::new(0, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 0, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Waiting for a payload
    Idle,
    /// Decoding and running the effect
    Dispatching,
    /// Publishing the completion response and the relayed command
    Relaying,
}

/// What happened to one processed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Decoded command with its node id resolved
    pub command: Command,
    /// How the effect ended; `None` when the operation is unknown
    pub outcome: Option<Outcome>,
    /// Whether a completion response was published
    pub notified: bool,
    /// Relay result when relaying was requested: the hop forwarded to
    pub relay: Option<Result<u8, RelayError>>,
}

/// Store an inbound message if it arrived on one of the node's channels
///
/// Meant for the transport callback, which cannot borrow the running
/// dispatcher. Returns `Ok(false)` for messages on foreign channels.
pub fn accept_message<const CAP: usize>(
    topics: &Topics,
    mailbox: &CommandMailbox<CAP>,
    topic: &str,
    payload: &[u8],
) -> Result<bool, MailboxOverrun> {
    if !topics.accepts(topic) {
        debug!("ignoring message on {}", topic);
        return Ok(false);
    }
    mailbox.post(payload).inspect_err(|err| warn!("{}", err))?;
    Ok(true)
}

pub struct Dispatcher<'a, D, H, O, const MAX_LEDS: usize>
where
    D: OutputDriver,
    H: Host,
    O: PublishOutbox,
{
    engine: Engine<'a, D, H, MAX_LEDS>,
    outbox: O,
    mailbox: &'a CommandMailbox,
    topics: Topics,
    node_id: u8,
    led_count: usize,
    state: DispatcherState,
    status: Option<&'a StatusCell>,
}

impl<'a, D, H, O, const MAX_LEDS: usize> Dispatcher<'a, D, H, O, MAX_LEDS>
where
    D: OutputDriver,
    H: Host,
    O: PublishOutbox,
{
    /// Fails when the configured prefix makes a channel name too long
    pub fn new(
        config: &NodeConfig,
        driver: D,
        host: H,
        mailbox: &'a CommandMailbox,
        outbox: O,
    ) -> Result<Self, TopicOverflow> {
        let topics = Topics::new(config.channel_prefix, config.node_id())?;
        let strip = PixelBuffer::new(driver).with_default_brightness(config.default_intensity);
        Ok(Self {
            engine: Engine::new(strip, host, mailbox, config),
            outbox,
            mailbox,
            topics,
            node_id: config.node_id(),
            led_count: config.led_count,
            state: DispatcherState::Idle,
            status: None,
        })
    }

    /// Report progress on a heartbeat indicator
    #[must_use]
    pub fn with_status(mut self, status: &'a StatusCell) -> Self {
        self.status = Some(status);
        self
    }

    pub fn engine(&self) -> &Engine<'a, D, H, MAX_LEDS> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<'a, D, H, MAX_LEDS> {
        &mut self.engine
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut O {
        &mut self.outbox
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    fn set_status(&self, state: StatusState) {
        if let Some(status) = self.status {
            status.set_state(state);
        }
    }

    /// Size the strip and run the power-on color sequence.
    ///
    /// An allocation failure switches the indicator to the error state; the
    /// node can still take part in networking but cannot render.
    pub async fn boot(&mut self) -> Result<(), AllocationError> {
        if let Err(err) = self.engine.strip_mut().initialize(self.led_count) {
            self.set_status(StatusState::Error);
            return Err(err);
        }
        info!("strip ready with {} pixels", self.led_count);

        for color in SELF_TEST_COLORS {
            self.engine.strip_mut().fill(color, true);
            self.engine.hold(SELF_TEST_HOLD_MS).await;
        }
        self.set_status(StatusState::Waiting);
        Ok(())
    }

    /// Tell the controller this node is listening
    pub fn announce(&mut self) {
        info!("announcing {}", self.topics.node);
        self.outbox
            .publish(&self.topics.registration, self.topics.node.as_bytes());
    }

    /// See [`accept_message`]
    pub fn on_message(&self, topic: &str, payload: &[u8]) -> Result<bool, MailboxOverrun> {
        accept_message(&self.topics, self.mailbox, topic, payload)
    }

    /// Process the pending command, if any
    pub async fn poll(&mut self) -> Option<Result<Report, DecodeError>> {
        let payload = self.mailbox.take()?;
        Some(self.process(&payload).await)
    }

    /// Dispatch commands forever
    pub async fn run(&mut self) {
        loop {
            if self.poll().await.is_none() {
                self.engine.idle().await;
            }
        }
    }

    /// Decode one payload, run it, then notify and relay as requested.
    ///
    /// A payload that does not decode has no side effects. Unknown operations
    /// render nothing but still notify and relay.
    pub async fn process(&mut self, payload: &[u8]) -> Result<Report, DecodeError> {
        self.state = DispatcherState::Dispatching;
        self.set_status(StatusState::Command);

        let mut command = match decode(payload) {
            Ok(command) => command,
            Err(err) => {
                warn!("dropping command: {}", err);
                self.finish();
                return Err(err);
            }
        };
        if command.node_id == 0 {
            command.node_id = self.node_id;
        }
        debug!("{:?}", command);

        let outcome = match EffectSlot::from_command(&command) {
            Ok(effect) => {
                info!("{}", command.op.as_str());
                Some(self.engine.run(&effect).await)
            }
            Err(UnknownOperation(raw)) => {
                warn!("unknown operation 0x{:02X}", raw);
                None
            }
        };

        let mut report = Report {
            command,
            outcome,
            notified: false,
            relay: None,
        };
        if report.command.notify || report.command.relay {
            self.state = DispatcherState::Relaying;
            if report.command.notify {
                report.notified = self.notify(&report.command);
            }
            if report.command.relay {
                report.relay = Some(self.relay(&report.command));
            }
        }

        self.finish();
        Ok(report)
    }

    fn finish(&mut self) {
        self.state = DispatcherState::Idle;
        self.set_status(StatusState::Waiting);
    }

    /// Publish the completion response on the node's response channel
    fn notify(&mut self, command: &Command) -> bool {
        match encode_response(command) {
            Ok(response) => {
                debug!("completion response to {}", self.topics.response);
                self.outbox.publish(&self.topics.response, &response);
                true
            }
            Err(err) => {
                warn!("completion response not sent: {}", err);
                false
            }
        }
    }

    /// Forward `command` to the next hop of its relay chain.
    ///
    /// A chain still naming this node at its head is first consumed. The next
    /// head becomes the destination and is removed before the command is
    /// re-encoded and published on that node's private channel. A zero hop is
    /// never forwarded, so a relay can never reach the broadcast channel.
    fn relay(&mut self, command: &Command) -> Result<u8, RelayError> {
        let mut forward = command.clone();
        if forward.relay_chain.head() == Some(self.node_id) {
            forward.shift_relay_chain();
        }

        let hop = match forward.relay_chain.head() {
            None => {
                info!("end of relay chain");
                return Err(RelayError::EmptyChain);
            }
            Some(0) => {
                error!("relay target is node 0, not forwarding");
                return Err(RelayError::ZeroHop);
            }
            Some(hop) => hop,
        };

        forward.node_id = hop;
        forward.shift_relay_chain();
        let payload = encode(&forward).map_err(|err| {
            error!("relay to node {} not sent: {}", hop, err);
            RelayError::Encode
        })?;

        let topic = self.topics.node_of(hop).map_err(|err| {
            error!("relay to node {} not sent: {}", hop, err);
            RelayError::Encode
        })?;
        info!("relaying to node {} on {}", hop, topic);
        self.outbox.publish(&topic, &payload);
        Ok(hop)
    }
}
