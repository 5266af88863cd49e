//! Engine runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to host requests.

use std::{sync::Arc, thread};

use toastwin_bridge::config::Config;
use toastwin_bridge::{BridgeChannels, MessageFromEngine, MessageToEngine};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::config::ConfigError;
use crate::state::State;

/// Errors that can occur while starting the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration could not be loaded.
    #[error("failed to load engine config: {0}")]
    Config(#[from] ConfigError),
    /// The async runtime or its thread could not be created.
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// A running engine, as seen from the host and the render surface.
pub struct EngineHandle {
    /// Sender for host commands.
    pub surface_tx: Sender<MessageToEngine>,
    /// Receiver for frames, dismissals and responses.
    pub surface_rx: Receiver<MessageFromEngine>,
    /// The engine thread. Finishes after a shutdown, or once the command
    /// channel is closed and every live notification has been dismissed.
    pub thread: thread::JoinHandle<()>,
    /// The configuration the engine runs with.
    pub config: Config,
}

/// Serve host messages on the current runtime until the host closes the
/// channel (and live notifications finish) or sends a shutdown.
pub async fn serve(config: Config, rx: Receiver<MessageToEngine>, tx: Sender<MessageFromEngine>) {
    let state = Arc::new(RwLock::new(State::new(config)));
    let context = Arc::new(AppContext::new(state, tx));
    context.consume_bridge_messages(rx).await;
}

/// Load the configuration and spawn the engine on a dedicated
/// single-threaded runtime.
pub fn start() -> Result<EngineHandle, EngineError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let config = runtime.block_on(crate::config::load_config())?;

    let channels = BridgeChannels::new(config.bridge.channel_capacity);
    let engine_config = config.clone();
    let thread = thread::Builder::new()
        .name("toastwin-engine".into())
        .spawn(move || {
            runtime.block_on(serve(engine_config, channels.engine_rx, channels.engine_tx));
        })?;

    Ok(EngineHandle {
        surface_tx: channels.surface_tx,
        surface_rx: channels.surface_rx,
        thread,
        config,
    })
}
