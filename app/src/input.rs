//! Frame input. Frames arrive as text, one hex encoded frame per line.
//! Blank lines and lines starting with '#' are skipped, whitespace and
//! colon separators inside a line are ignored so frames can be grouped
//! byte by byte.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Result;

/// Decode a hex string into bytes, tolerating whitespace and colon
/// separators between the digits
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    Ok(hex::decode(digits)?)
}

/// Reads hex encoded frames from a line oriented source
pub struct FrameReader<R> {
    reader: R,
}

impl FrameReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Get the next frame, None once the input is exhausted
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Ok(Some(decode_hex(trimmed)?));
        }
    }
}
