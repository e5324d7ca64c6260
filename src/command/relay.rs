use heapless::Vec;

/// Maximum number of hops a command can carry
pub const MAX_RELAY_NODES: usize = 16;

/// Ordered list of node ids a command is forwarded through
///
/// The head is the next hop. Each node that forwards the command consumes the
/// head with [`RelayChain::shift`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayChain {
    nodes: Vec<u8, MAX_RELAY_NODES>,
}

impl RelayChain {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a chain from hops; `None` when there are more than
    /// [`MAX_RELAY_NODES`].
    pub fn from_slice(hops: &[u8]) -> Option<Self> {
        Vec::from_slice(hops).ok().map(|nodes| Self { nodes })
    }

    /// Next hop, if any
    pub fn head(&self) -> Option<u8> {
        self.nodes.first().copied()
    }

    /// Drop the head and move every later hop one place forward.
    ///
    /// An empty chain stays empty.
    pub fn shift(&mut self) {
        if !self.nodes.is_empty() {
            self.nodes.remove(0);
        }
    }

    /// Append a hop; returns it back when the chain is full
    pub fn push(&mut self, hop: u8) -> Result<(), u8> {
        self.nodes.push(hop)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.nodes
    }

    pub(crate) fn as_vec(&self) -> &Vec<u8, MAX_RELAY_NODES> {
        &self.nodes
    }

    pub(crate) fn from_vec(nodes: Vec<u8, MAX_RELAY_NODES>) -> Self {
        Self { nodes }
    }
}
