//! We do not own or copy capture data in this module.
//! All we do here is describing a window over bytes somebody else holds,
//! that's it. A buffer is a raw byte region plus a current read position
//! and a logical end of data, which may sit before the physical end when
//! only part of a frame was captured.

use anyhow::{anyhow, Result};

/// Read-only window over raw capture bytes
pub trait Buffer {
    /// Get the entire underlying byte region
    fn raw(&self) -> &[u8];

    /// Get the current read position, in bytes from the start of `raw`
    fn position(&self) -> usize;

    /// Get the logical end of data, in bytes from the start of `raw`
    ///
    /// It's the implementor's duty to guarantee
    /// `position() <= end_of_data() <= raw().len()`
    fn end_of_data(&self) -> usize;

    /// Get the number of readable bytes left in the window
    #[inline]
    fn remaining(&self) -> usize {
        self.end_of_data() - self.position()
    }

    /// Get the readable window itself
    #[inline]
    fn data(&self) -> &[u8] {
        &self.raw()[self.position()..self.end_of_data()]
    }
}

/// Borrowed byte slice with an explicit position and logical end
#[derive(Clone, Copy, Debug)]
pub struct SliceBuffer<'a> {
    raw: &'a [u8],
    position: usize,
    end_of_data: usize,
}

impl<'a> SliceBuffer<'a> {
    /// Create a buffer over `raw` with an explicit window, rejecting
    /// inconsistent bounds up front so reads never have to re-check them
    pub fn new(raw: &'a [u8], position: usize, end_of_data: usize) -> Result<Self> {
        if position > end_of_data {
            return Err(anyhow!(
                "buffer position {} is beyond end of data {}",
                position,
                end_of_data
            ));
        }

        if end_of_data > raw.len() {
            return Err(anyhow!(
                "end of data {} is beyond physical buffer length {}",
                end_of_data,
                raw.len()
            ));
        }

        Ok(Self {
            raw,
            position,
            end_of_data,
        })
    }

    /// Create a buffer covering an entire slice
    pub fn whole(raw: &'a [u8]) -> Self {
        Self {
            raw,
            position: 0,
            end_of_data: raw.len(),
        }
    }
}

impl<'a> Buffer for SliceBuffer<'a> {
    fn raw(&self) -> &[u8] {
        self.raw
    }

    fn position(&self) -> usize {
        self.position
    }

    fn end_of_data(&self) -> usize {
        self.end_of_data
    }
}
