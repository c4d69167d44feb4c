//! Field layouts describe where the interesting bytes of a protocol header
//! live. A layout is plain data: a protocol gets parsed by looking its
//! layout up in a registry, not by writing a dedicated analyzer type.
//!
//! Bad layouts are rejected when the layout is built. Extraction assumes
//! every layout it sees already passed validation.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Widest field a layout may declare, in bytes. Values are returned as u64
pub const MAX_FIELD_WIDTH: u8 = 8;

#[derive(Debug, PartialEq)]
pub enum LayoutError {
    /// A field declared width 0, which would silently extract nothing
    ZeroWidthField(String),
    /// A field wider than a u64 value can hold
    FieldTooWide(String, u8),
    /// offset + width does not fit in a u64
    OffsetOverflow(String),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::ZeroWidthField(name) => {
                write!(f, "field '{}' has zero width", name)
            }
            LayoutError::FieldTooWide(name, width) => {
                write!(
                    f,
                    "field '{}' is {} bytes wide, {} is the widest supported",
                    name, width, MAX_FIELD_WIDTH
                )
            }
            LayoutError::OffsetOverflow(name) => {
                write!(f, "field '{}' overflows the addressable range", name)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// A single fixed-offset field of a protocol header
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name, e.g. "dsap"
    pub name: String,
    /// Offset in bytes, relative to the buffer's current position
    pub offset: u64,
    /// Field width in bytes
    pub width: u8,
}

impl FieldSpec {
    pub fn new<S: AsRef<str>>(name: S, offset: u64, width: u8) -> Self {
        Self {
            name: name.as_ref().to_string(),
            offset,
            width,
        }
    }

    /// A single byte field
    pub fn byte<S: AsRef<str>>(name: S, offset: u64) -> Self {
        Self::new(name, offset, 1)
    }
}

/// Ordered field table of one protocol, plus the event name its values are
/// delivered under and the diagnostic tag raised when data runs short.
///
/// Field offsets may be declared in any order and may even overlap; values
/// always come out in declaration order.
#[derive(Clone, Debug)]
pub struct Layout {
    name: String,
    event: String,
    truncated_tag: String,
    fields: Vec<FieldSpec>,
    required: u64,
}

impl Layout {
    /// Create a layout with the default event name and diagnostic tag
    pub fn new<S: AsRef<str>>(name: S, fields: Vec<FieldSpec>) -> Result<Self, LayoutError> {
        let name = name.as_ref();
        Self::with_events(
            name,
            Self::default_event(name),
            Self::default_truncated_tag(name),
            fields,
        )
    }

    /// Create a layout with explicit event name and diagnostic tag
    pub fn with_events<S1, S2, S3>(
        name: S1,
        event: S2,
        truncated_tag: S3,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, LayoutError>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: AsRef<str>,
    {
        let mut required = 0;
        for field in &fields {
            if field.width == 0 {
                return Err(LayoutError::ZeroWidthField(field.name.clone()));
            }

            if field.width > MAX_FIELD_WIDTH {
                return Err(LayoutError::FieldTooWide(field.name.clone(), field.width));
            }

            let end = match field.offset.checked_add(field.width as u64) {
                Some(end) => end,
                None => return Err(LayoutError::OffsetOverflow(field.name.clone())),
            };
            required = std::cmp::max(required, end);
        }

        Ok(Self {
            name: name.as_ref().to_string(),
            event: event.as_ref().to_string(),
            truncated_tag: truncated_tag.as_ref().to_string(),
            fields,
            required,
        })
    }

    /// Default event name for a protocol, e.g. "llc_message" for "llc"
    pub fn default_event(name: &str) -> String {
        format!("{}_message", name)
    }

    /// Default diagnostic tag for a protocol, e.g. "truncated_llc_header"
    pub fn default_truncated_tag(name: &str) -> String {
        format!("truncated_{}_header", name)
    }

    /// Get the protocol name this layout is registered under
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the event name extracted values are delivered under
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Get the diagnostic tag raised on truncated data
    #[inline]
    pub fn truncated_tag(&self) -> &str {
        &self.truncated_tag
    }

    /// Get the field table, in declaration order
    #[inline]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get the bytes needed past the current position to extract every field
    #[inline]
    pub fn required_bytes(&self) -> u64 {
        self.required
    }
}
