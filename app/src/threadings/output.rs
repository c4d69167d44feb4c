use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use crossbeam_channel::Receiver;

use basile_api as api;
use api::config::Config;
use api::events::Event;

pub struct Thread {
    exit: Arc<AtomicBool>,
    receiver: Receiver<Event>,
}

impl Thread {
    pub fn new(exit: Arc<AtomicBool>, receiver: Receiver<Event>) -> Self {
        Thread { exit, receiver }
    }

    pub fn name(&self) -> String {
        format!("basile-output")
    }

    /// Print every delivered event as one JSON line on stdout
    pub fn spawn(&self, _cfg: Arc<Config>) -> Result<()> {
        println!("{} started", self.name());

        while !self.exit.load(Ordering::Relaxed) {
            let event = match self.receiver.recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            println!("{}", serde_json::to_string(&event)?);
        }

        println!("{} exit", self.name());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::events::Values;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn drains_buffered_events_after_disconnect() {
        let exit = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = crossbeam_channel::bounded(4);
        sender
            .send(Event::new("llc_message", Values::default()))
            .unwrap();
        sender
            .send(Event::new("arp_message", Values::default()))
            .unwrap();
        drop(sender);

        let thread = Thread::new(exit, receiver.clone());
        thread.spawn(Arc::new(Config::default())).unwrap();

        // everything buffered was taken off the channel before leaving
        assert!(receiver.try_recv().is_err());
    }
}
