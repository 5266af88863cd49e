//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! frames and responses back to the render surface.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::task::TaskTracker;
use toastwin_bridge::{MessageFromEngine, MessageToEngine};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and lifecycle tasks.
pub(crate) struct AppContext {
    /// Engine state shared across services and lifecycle tasks.
    pub state: SharedState,
    /// Outbound channel to the render surface.
    pub tx: Sender<MessageFromEngine>,
    /// Lifecycle tasks of the notifications this context started.
    pub tasks: TaskTracker,
}

impl AppContext {
    pub fn new(state: SharedState, tx: Sender<MessageFromEngine>) -> Self {
        Self {
            state,
            tx,
            tasks: TaskTracker::new(),
        }
    }

    /// Read and dispatch messages from the host until it closes the channel
    /// or asks for a shutdown.
    ///
    /// When the channel closes, notifications already on screen are allowed
    /// to finish, final frames included, before this returns.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToEngine>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a host message: {message:?}");
            if self.dispatch_message(message).await.is_break() {
                break;
            }
        }

        log::debug!("Waiting for {} lifecycle task(s)", self.tasks.len());
        self.tasks.close();
        self.tasks.wait().await;
    }

    /// Dispatches the received message from the host down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToEngine) -> ControlFlow<()> {
        match message {
            MessageToEngine::Notify(request) => {
                services::notify_service::handle_notify_request(self.clone(), request).await;
            }
            MessageToEngine::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToEngine::Shutdown => {
                services::notify_service::handle_shutdown(self.clone()).await;
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Send a message to the render surface. Returns `false` if the surface
    /// has gone away; the message is dropped in that case.
    pub async fn send(&self, message: MessageFromEngine) -> bool {
        match self.tx.send(message).await {
            Ok(()) => true,
            Err(error) => {
                log::warn!("Render surface is gone, dropping {:?}", error.0);
                false
            }
        }
    }
}
