use serde::Serialize;

/// Frame processing statistic information
#[derive(Debug, Default, Serialize)]
pub struct ProcessStat {
    /// Total processed frames
    pub frames: u64,
    /// Total delivered events
    pub events: u64,
    /// Total frames too short for their layout
    pub truncated: u64,
}
