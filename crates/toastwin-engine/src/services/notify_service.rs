//! Presentation dispatcher for the `notify` event.

use tokio::time::Instant;
use toastwin_bridge::MessageFromEngine;
use toastwin_bridge::notification::NotificationRequest;

use crate::defaults;
use crate::lifecycle::{self, LifecycleController};

/// Handles an incoming notification request (see
/// [`toastwin_bridge::MessageToEngine::Notify`]).
///
/// Requests without a title and a description are dropped. Otherwise the
/// request is resolved and upserted into the registry, disposing any live
/// instance with the same identity. The surface hears about the replaced
/// instance before the new one's first frame.
pub async fn handle_notify_request(context: super::AppContextHandle, request: NotificationRequest) {
    let (lease, resolved) = {
        let mut state = context.state.write().await;
        let Some(resolved) = defaults::resolve(request, &state.config.notifications) else {
            log::debug!("Dropping notification without title or description");
            return;
        };
        (state.registry.upsert(resolved.identity.as_deref()), resolved)
    };

    if let Some(previous) = lease.superseded {
        log::debug!("Notification {} replaces generation {previous}", lease.key);
        context
            .send(MessageFromEngine::Dismissed {
                key: lease.key.clone(),
                generation: previous,
            })
            .await;
    }

    let controller = LifecycleController::new(lease.key.clone(), lease.generation, resolved);
    let mut state = context.state.write().await;
    let task = context.tasks.spawn(lifecycle::drive(
        context.clone(),
        controller,
        lease.clone(),
        Instant::now(),
    ));
    state.registry.attach(&lease, task);
}

/// Handles a shutdown request (see
/// [`toastwin_bridge::MessageToEngine::Shutdown`]) by disposing every live
/// instance.
pub async fn handle_shutdown(context: super::AppContextHandle) {
    let disposed = {
        let mut state = context.state.write().await;
        state.registry.dispose_all()
    };

    log::info!("Shutting down, disposed {} notification(s)", disposed.len());
    for (key, generation) in disposed {
        context
            .send(MessageFromEngine::Dismissed { key, generation })
            .await;
    }
}
