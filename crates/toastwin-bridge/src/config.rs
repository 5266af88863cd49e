use serde::{Deserialize, Serialize};

use crate::notification::Position;

/// Fallbacks applied to requests that leave a field unset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationDefaults {
    /// Display time in milliseconds for requests without a positive duration.
    pub default_duration_ms: u64,
    /// Anchor for requests without a position.
    pub default_position: Position,
    /// Whether the countdown ring is shown when the request does not say.
    pub default_show_countdown: bool,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            default_position: Position::TopRight,
            default_show_countdown: true,
        }
    }
}

/// Sizing of the channels between the engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Capacity of each bounded channel in [`crate::BridgeChannels`].
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fallback values for notification requests.
    pub notifications: NotificationDefaults,
    /// Channel configuration for the bridge.
    pub bridge: BridgeConfig,
}
