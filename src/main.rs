mod fixtures;
mod surface;

use anyhow::Context;
use toastwin_bridge::MessageToEngine;

use crate::fixtures::DebugEvent;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .context("failed to build logger instance")?;

    let events = match std::env::args_os().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read fixtures from {path:?}"))?;
            fixtures::parse(&text)?
        }
        None => fixtures::builtin()?,
    };

    let toastwin_engine::EngineHandle {
        surface_tx,
        surface_rx,
        thread,
        ..
    } = toastwin_engine::start()?;

    surface_tx.blocking_send(MessageToEngine::ConfigurationRequest)?;
    for event in events {
        match event {
            DebugEvent::Notify(request) => {
                surface_tx.blocking_send(MessageToEngine::Notify(request))?;
            }
        }
    }
    // closing the channel lets the engine stop once everything is dismissed
    drop(surface_tx);

    surface::run(surface_rx);
    thread
        .join()
        .map_err(|_| anyhow::anyhow!("engine thread panicked"))
}
