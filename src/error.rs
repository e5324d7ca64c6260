//! Error types surfaced by the node.
//!
//! Decode and routing failures are handled locally by the dispatcher and only
//! logged; allocation failure is the one boot-time error that stops rendering.

use core::fmt;

/// Inbound payload could not be turned into a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload was empty
    Empty,
    /// Payload was not a well-formed JSON object of the expected shape
    Malformed,
}

/// Command did not fit into the outbound buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeError;

/// Operation code has no handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOperation(pub u8);

/// Relay step could not be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    /// Relay requested but no hops remain
    EmptyChain,
    /// Head of the chain is the zero sentinel
    ZeroHop,
    /// Forwarded command or its channel name could not be encoded
    Encode,
}

/// Channel name longer than the topic buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicOverflow {
    pub capacity: usize,
}

/// Inbound payload larger than the command buffer, discarded whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxOverrun {
    pub len: usize,
    pub capacity: usize,
}

/// Pixel storage could not be sized for the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    pub requested: usize,
    pub capacity: usize,
}

/// Any error the node can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Decode(DecodeError),
    Encode(EncodeError),
    UnknownOperation(UnknownOperation),
    Relay(RelayError),
    Overrun(MailboxOverrun),
    Allocation(AllocationError),
    Topic(TopicOverflow),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "empty command payload"),
            DecodeError::Malformed => write!(f, "malformed command payload"),
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command does not fit the output buffer")
    }
}

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation 0x{:02X}", self.0)
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::EmptyChain => write!(f, "end of relay chain"),
            RelayError::ZeroHop => write!(f, "relay hop is node 0"),
            RelayError::Encode => write!(f, "relay command does not fit the output buffer"),
        }
    }
}

impl fmt::Display for MailboxOverrun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payload of {} bytes exceeds command buffer of {} bytes",
            self.len, self.capacity
        )
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to allocate {} pixels (capacity {})",
            self.requested, self.capacity
        )
    }
}

impl fmt::Display for TopicOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel name exceeds {} bytes", self.capacity)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "decode error: {}", e),
            Error::Encode(e) => write!(f, "encode error: {}", e),
            Error::UnknownOperation(e) => write!(f, "{}", e),
            Error::Relay(e) => write!(f, "relay error: {}", e),
            Error::Overrun(e) => write!(f, "buffer overrun: {}", e),
            Error::Allocation(e) => write!(f, "allocation failure: {}", e),
            Error::Topic(e) => write!(f, "{}", e),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Error::Encode(e)
    }
}

impl From<UnknownOperation> for Error {
    fn from(e: UnknownOperation) -> Self {
        Error::UnknownOperation(e)
    }
}

impl From<RelayError> for Error {
    fn from(e: RelayError) -> Self {
        Error::Relay(e)
    }
}

impl From<MailboxOverrun> for Error {
    fn from(e: MailboxOverrun) -> Self {
        Error::Overrun(e)
    }
}

impl From<AllocationError> for Error {
    fn from(e: AllocationError) -> Self {
        Error::Allocation(e)
    }
}

impl From<TopicOverflow> for Error {
    fn from(e: TopicOverflow) -> Self {
        Error::Topic(e)
    }
}
