//! Extracted values leave the extractor as named events. Who consumes them
//! and over what transport is none of the extractor's business, so delivery
//! hides behind a trait object handed in at construction time.

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use serde::Serialize;
use tinyvec::TinyVec;

/// Unsigned value extracted from a single field, big-endian
pub type Value = u64;

/// Extracted values in layout declaration order.
/// Most protocol headers have a handful of fields, so keep them inline
pub type Values = TinyVec<[Value; 4]>;

/// Named event carrying the values of one successful extraction
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Event {
    /// Event name taken from the layout, e.g. "llc_message"
    pub name: String,
    /// One value per layout field, in declaration order
    pub values: Values,
}

impl Event {
    pub fn new<S: AsRef<str>>(name: S, values: Values) -> Self {
        Self {
            name: name.as_ref().to_string(),
            values,
        }
    }
}

/// Event delivery boundary
pub trait EventSink: Send + Sync {
    /// Hand one event over for delivery
    fn enqueue(&self, event: Event) -> Result<()>;
}

/// Event sink backed by a crossbeam channel sender
pub struct ChannelSink {
    sender: Sender<Event>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn enqueue(&self, event: Event) -> Result<()> {
        match self.sender.send(event) {
            Ok(_) => Ok(()),
            Err(_) => Err(anyhow!("event channel is disconnected")),
        }
    }
}
