//! Communication bridge between the notification engine and its collaborators.
//!
//! This crate defines the types used to connect the host's event transport
//! and render surface with the asynchronous engine that runs notification
//! lifecycles.
//!
//! The flow is unidirectional on each side:
//! - The host sends commands (a `notify` request, a configuration query, a
//!   shutdown).
//! - The engine pushes events (render frames over a notification's life,
//!   dismissals, configuration responses).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure and a clean separation
//! between timing policy and painting.

pub mod config;
pub mod notification;
pub mod render;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the engine towards the render surface.
#[derive(Debug, Clone)]
pub enum MessageFromEngine {
    /// Current presentation parameters of one instance. Sent on every phase
    /// transition and every countdown step.
    Render(render::RenderFrame),
    /// The instance finished its exit animation or was replaced; the surface
    /// should forget it.
    Dismissed {
        key: render::InstanceKey,
        generation: u64,
    },
    /// Response to the configuration request.
    ConfigurationResponse(config::Config),
}

/// Commands issued by the host to the engine.
#[derive(Debug, Clone)]
pub enum MessageToEngine {
    /// The `notify` event: present a notification.
    Notify(notification::NotificationRequest),
    /// Request for the engine configuration.
    ConfigurationRequest,
    /// Dispose every live instance and stop processing messages.
    Shutdown,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between the
/// render surface and the engine.
pub struct BridgeChannels {
    /// Receiver used by the surface to get messages from the engine.
    pub surface_rx: Receiver<MessageFromEngine>,
    /// Sender used by the host to send commands to the engine.
    pub surface_tx: Sender<MessageToEngine>,

    /// Receiver used by the engine to get commands from the host.
    pub engine_rx: Receiver<MessageToEngine>,
    /// Sender used by the engine to send frames/responses to the surface.
    pub engine_tx: Sender<MessageFromEngine>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_engine_tx, to_engine_rx) = mpsc::channel(buffer);
        let (to_surface_tx, to_surface_rx) = mpsc::channel(buffer);
        Self {
            surface_tx: to_engine_tx,
            surface_rx: to_surface_rx,
            engine_rx: to_engine_rx,
            engine_tx: to_surface_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(config::BridgeConfig::default().channel_capacity)
    }
}
