//! We do not interpret field values in this module.
//! All we do here is checking the layout against the buffer window and
//! pulling the declared bytes out as unsigned big-endian values, that's it.
//! Making sense of the values is the event consumer's job.

use anyhow::{anyhow, Result};

use crate::buffer::Buffer;
use crate::diagnostics::Diagnostics;
use crate::events::{Event, EventSink, Value, Values};
use crate::layout::Layout;
use crate::registry::LayoutRegistry;

/// Outcome of one extraction attempt
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractionResult {
    /// One unsigned value per layout field, in declaration order
    Fields(Values),
    /// The buffer window is too short for the layout
    Truncated,
}

impl ExtractionResult {
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, ExtractionResult::Truncated)
    }

    /// Get the extracted values, if there are any
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            ExtractionResult::Fields(values) => Some(values.as_slice()),
            ExtractionResult::Truncated => None,
        }
    }
}

/// Extract every layout field from the buffer window, or report truncation.
///
/// The whole layout is checked against the window up front. A window too
/// short for any field extracts nothing at all, there are no partial
/// results. Each field is read at `position + offset` as a big-endian
/// unsigned integer of `width` bytes. Reading has no side effect on the
/// buffer, running the same extraction twice yields the same result.
pub fn extract(buf: &dyn Buffer, layout: &Layout) -> ExtractionResult {
    let needed = match (buf.position() as u64).checked_add(layout.required_bytes()) {
        Some(needed) => needed,
        // farther than a u64 can address, no buffer can satisfy this
        None => return ExtractionResult::Truncated,
    };
    if needed > buf.end_of_data() as u64 {
        return ExtractionResult::Truncated;
    }

    let raw = buf.raw();
    let mut values = Values::default();
    for field in layout.fields() {
        // in window bounds, the check above covered offset + width
        let start = buf.position() + field.offset as usize;
        let mut value: Value = 0;
        for byte in &raw[start..start + field.width as usize] {
            value = value << 8 | *byte as Value;
        }
        values.push(value);
    }

    ExtractionResult::Fields(values)
}

/// Ties the layout registry and the outbound boundaries together:
/// look a layout up by protocol name, extract, deliver.
pub struct Extractor {
    registry: LayoutRegistry,
    sink: Box<dyn EventSink>,
    diagnostics: Box<dyn Diagnostics>,
}

impl Extractor {
    pub fn new(
        registry: LayoutRegistry,
        sink: Box<dyn EventSink>,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        Self {
            registry,
            sink,
            diagnostics,
        }
    }

    /// Get the layout registry this extractor selects from
    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// Run the layout registered under `name` against one buffer.
    ///
    /// On success the values are enqueued on the event sink under the
    /// layout's event name. On truncation the diagnostics boundary is
    /// notified with the layout's tag. The outcome is returned either way;
    /// whether to retry with more data is the caller's policy.
    pub fn process(&self, name: &str, buf: &dyn Buffer) -> Result<ExtractionResult> {
        let layout = match self.registry.get(name) {
            Some(layout) => layout,
            None => return Err(anyhow!("no layout registered under '{}'", name)),
        };

        let result = extract(buf, layout);
        match &result {
            ExtractionResult::Truncated => self.diagnostics.notify(layout.truncated_tag()),
            ExtractionResult::Fields(values) => self
                .sink
                .enqueue(Event::new(layout.event(), values.clone()))?,
        };

        Ok(result)
    }
}
