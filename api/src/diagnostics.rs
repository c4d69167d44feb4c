//! Out-of-band notifications about data that looked wrong on the wire,
//! identified by a short stable tag like "truncated_llc_header".
//!
//! Notification is fire and forget. Implementations must never block the
//! extraction path; when the consumer can't keep up the notification is
//! dropped, not queued indefinitely.

use crossbeam_channel::Sender;

/// Diagnostic notification boundary
pub trait Diagnostics: Send + Sync {
    /// Report one occurrence of the condition identified by `tag`
    fn notify(&self, tag: &str);
}

/// Diagnostics backed by a crossbeam channel sender.
///
/// A full or disconnected channel drops the notification
pub struct ChannelDiagnostics {
    sender: Sender<String>,
}

impl ChannelDiagnostics {
    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }
}

impl Diagnostics for ChannelDiagnostics {
    fn notify(&self, tag: &str) {
        let _ = self.sender.try_send(tag.to_string());
    }
}

/// Diagnostics that go nowhere
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn notify(&self, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_forwards_the_tag() {
        let (sender, receiver) = crossbeam_channel::bounded(4);
        let diags = ChannelDiagnostics::new(sender);

        diags.notify("truncated_llc_header");
        assert_eq!(receiver.recv().unwrap(), "truncated_llc_header");
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let diags = ChannelDiagnostics::new(sender);

        diags.notify("first");
        diags.notify("second");

        assert_eq!(receiver.recv().unwrap(), "first");
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn disconnected_channel_is_silently_ignored() {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let diags = ChannelDiagnostics::new(sender);
        drop(receiver);

        diags.notify("truncated_llc_header");
    }

    #[test]
    fn null_diagnostics_accepts_everything() {
        NullDiagnostics.notify("truncated_llc_header");
    }
}
