use crate::registry::InstanceRegistry;

/// The core engine state: configuration and the registry of live
/// notification instances.
///
/// Wrapped in [`SharedState`] so the message loop and every lifecycle task
/// can reach it. Writers never hold the lock across an await point, which
/// keeps replace-then-create a single uninterrupted step.
#[derive(Debug)]
pub struct State {
    /// The loaded engine configuration.
    pub config: toastwin_bridge::config::Config,
    /// Live instances by identity.
    pub registry: InstanceRegistry,
}

impl State {
    pub fn new(config: toastwin_bridge::config::Config) -> Self {
        Self {
            config,
            registry: InstanceRegistry::new(),
        }
    }
}

/// Thread-safe, async-friendly shared reference to the engine [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
