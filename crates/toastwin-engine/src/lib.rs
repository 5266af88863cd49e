//! Notification lifecycle engine entry point and public API surface.
//!
//! This crate turns `notify` requests into timed presentation phases: it
//! resolves defaults, keeps at most one live instance per identity, runs the
//! reveal/countdown/exit schedule and streams render frames to the surface.

pub mod animation;
mod app;
pub mod color;
mod config;
pub mod defaults;
pub mod lifecycle;
pub mod registry;
mod runtime;
mod services;
mod state;

pub(crate) use crate::app::AppContext;
pub use crate::config::{ConfigError, load_config, save_config};
pub use crate::runtime::{EngineError, EngineHandle, serve, start};
