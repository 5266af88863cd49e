//! Engine service handlers for host-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, mutate the instance registry, and emit frames or responses
//! back to the render surface.

pub mod config_service;
pub mod notify_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::AppContext>;
