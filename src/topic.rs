//! Channel names shared by the controller and the nodes.
//!
//! `{prefix}/all` reaches every node, `{prefix}/node/{id}` a single node,
//! `{prefix}/resp/{id}` carries that node's completion responses and
//! `{prefix}/register` collects node announcements.

use core::fmt::Write;

use heapless::String;

use crate::error::TopicOverflow;

/// Longest channel name the node builds
pub const MAX_TOPIC_LEN: usize = 64;

pub type Topic = String<MAX_TOPIC_LEN>;

fn build(prefix: &str, suffix: &str, id: Option<u8>) -> Result<Topic, TopicOverflow> {
    let mut topic = Topic::new();
    match id {
        Some(id) => write!(topic, "{}/{}/{}", prefix, suffix, id),
        None => write!(topic, "{}/{}", prefix, suffix),
    }
    .map_err(|_| TopicOverflow {
        capacity: MAX_TOPIC_LEN,
    })?;
    Ok(topic)
}

/// Broadcast channel every node subscribes to
pub fn all_nodes_topic(prefix: &str) -> Result<Topic, TopicOverflow> {
    build(prefix, "all", None)
}

/// Private channel of node `id`
pub fn node_topic(prefix: &str, id: u8) -> Result<Topic, TopicOverflow> {
    build(prefix, "node", Some(id))
}

/// Completion-response channel of node `id`
pub fn response_topic(prefix: &str, id: u8) -> Result<Topic, TopicOverflow> {
    build(prefix, "resp", Some(id))
}

/// Channel nodes announce themselves on
pub fn registration_topic(prefix: &str) -> Result<Topic, TopicOverflow> {
    build(prefix, "register", None)
}

/// Precomputed channel names for one node
#[derive(Debug, Clone)]
pub struct Topics {
    prefix: &'static str,
    pub all: Topic,
    pub node: Topic,
    pub response: Topic,
    pub registration: Topic,
}

impl Topics {
    /// Build every channel name, failing if one does not fit
    pub fn new(prefix: &'static str, node_id: u8) -> Result<Self, TopicOverflow> {
        Ok(Self {
            prefix,
            all: all_nodes_topic(prefix)?,
            node: node_topic(prefix, node_id)?,
            response: response_topic(prefix, node_id)?,
            registration: registration_topic(prefix)?,
        })
    }

    /// Private channel of another node, used when relaying
    pub fn node_of(&self, id: u8) -> Result<Topic, TopicOverflow> {
        node_topic(self.prefix, id)
    }

    /// Channels the node listens on
    pub fn subscriptions(&self) -> [&str; 2] {
        [self.all.as_str(), self.node.as_str()]
    }

    /// Whether an inbound message on `topic` is meant for this node
    pub fn accepts(&self, topic: &str) -> bool {
        topic == self.all.as_str() || topic == self.node.as_str()
    }
}
