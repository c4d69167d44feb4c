use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use crossbeam_channel::Receiver;

use basile_api as api;
use api::config::Config;

pub struct Thread {
    exit: Arc<AtomicBool>,
    receiver: Receiver<String>,
}

impl Thread {
    pub fn new(exit: Arc<AtomicBool>, receiver: Receiver<String>) -> Self {
        Thread { exit, receiver }
    }

    pub fn name(&self) -> String {
        format!("basile-diag")
    }

    /// Print diagnostic tags on stderr, unless running quiet
    pub fn spawn(&self, cfg: Arc<Config>) -> Result<()> {
        println!("{} started", self.name());

        while !self.exit.load(Ordering::Relaxed) {
            let tag = match self.receiver.recv() {
                Ok(tag) => tag,
                Err(_) => break,
            };
            if !cfg.quiet {
                eprintln!("diag: {}", tag);
            }
        }

        println!("{} exit", self.name());

        Ok(())
    }
}
