#[macro_use]
extern crate clap;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use crossbeam_channel::bounded;

use basile_api as api;
use api::buffer::SliceBuffer;
use api::diagnostics::{ChannelDiagnostics, Diagnostics, NullDiagnostics};
use api::events::ChannelSink;
use api::extract::Extractor;
use api::registry::LayoutRegistry;

mod commands;
mod config;
mod input;
mod stats;
mod threadings;

fn main() -> Result<()> {
    let root_cmd = commands::new_root_command();
    let cfg = config::parse_args(root_cmd)?;

    signal_hook::flag::register(signal_hook::consts::SIGTERM, cfg.exit.clone())?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, cfg.exit.clone())?;

    let cfg = Arc::new(cfg);

    let mut registry = LayoutRegistry::new();
    for name in &cfg.builtin {
        register_builtin(&mut registry, name.as_str())?;
    }
    registry.load(&cfg)?;
    println!("{} layouts registered", registry.len());

    if cfg.list_layouts {
        list_layouts(&registry);
        return Ok(());
    }

    if cfg.input.is_empty() {
        return Err(anyhow!("no frame input file, use -r <FRAME-FILE>"));
    }

    if registry.get(cfg.layout.as_str()).is_none() {
        return Err(anyhow!("no layout registered under '{}'", cfg.layout));
    }

    let (event_sender, event_receiver) = bounded(cfg.event_channel_size as usize);
    let (diag_sender, diag_receiver) = bounded(cfg.diag_channel_size as usize);

    let diagnostics: Box<dyn Diagnostics> = if cfg.diagnostics {
        Box::new(ChannelDiagnostics::new(diag_sender))
    } else {
        drop(diag_sender);
        Box::new(NullDiagnostics)
    };
    let extractor = Extractor::new(
        registry,
        Box::new(ChannelSink::new(event_sender)),
        diagnostics,
    );

    let mut handles = vec![];

    let thread = threadings::OutputThread::new(cfg.exit.clone(), event_receiver);
    let builder = std::thread::Builder::new().name(thread.name());
    let thread_cfg = cfg.clone();
    handles.push(builder.spawn(move || thread.spawn(thread_cfg))?);

    let thread = threadings::DiagThread::new(cfg.exit.clone(), diag_receiver);
    let builder = std::thread::Builder::new().name(thread.name());
    let thread_cfg = cfg.clone();
    handles.push(builder.spawn(move || thread.spawn(thread_cfg))?);

    let mut stat = stats::ProcessStat::default();
    let mut reader = input::FrameReader::open(cfg.input.as_str())?;
    while !cfg.exit.load(Ordering::Relaxed) {
        let frame = match reader.next_frame()? {
            Some(frame) => frame,
            None => break,
        };

        let buf = SliceBuffer::whole(&frame);
        let result = extractor.process(cfg.layout.as_str(), &buf)?;

        stat.frames += 1;
        if result.is_truncated() {
            stat.truncated += 1;
        } else {
            stat.events += 1;
        }

        if cfg.verbose_mode {
            println!("frame {}: {:?}", stat.frames, result);
        }
    }

    // disconnect both channels so the threads drain what is buffered and
    // leave; the exit flag stays untouched here, it belongs to the signals
    drop(extractor);

    for handle in handles {
        match handle.join() {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => eprintln!("{}", e),
            Err(e) => println!("{:?}", e),
        };
    }

    println!("{}", serde_json::to_string(&stat)?);

    Ok(())
}

/// Register one builtin layout set by name
fn register_builtin(registry: &mut LayoutRegistry, name: &str) -> Result<()> {
    match name {
        "llc" => llc::register(registry),
        "arp" => arp::register(registry),
        _ => Err(anyhow!(
            "unknown builtin layout set '{}', expecting one of llc, arp",
            name
        )),
    }
}

fn list_layouts(registry: &LayoutRegistry) {
    let mut names = registry.names();
    names.sort_unstable();
    for name in names {
        let layout = match registry.get(name) {
            Some(layout) => layout,
            None => continue,
        };
        println!("{} -> {}", name, layout.event());
        for field in layout.fields() {
            println!(
                "    {} @ {} ({} bytes)",
                field.name, field.offset, field.width
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets_register_by_name() {
        let mut registry = LayoutRegistry::new();
        register_builtin(&mut registry, "llc").unwrap();
        register_builtin(&mut registry, "arp").unwrap();
        // the llc set carries llc and snap
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn unknown_builtin_name_lists_the_known_sets() {
        let mut registry = LayoutRegistry::new();
        let err = match register_builtin(&mut registry, "mpls") {
            Ok(_) => panic!("mpls must not be a builtin set"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("mpls"));
        assert!(err.contains("llc") && err.contains("arp"));
    }
}
