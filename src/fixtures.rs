//! Debug fixtures: ordered `notify` events for exercising the engine by hand.

use serde::Deserialize;
use toastwin_bridge::notification::NotificationRequest;

const BUILTIN: &str = include_str!("../fixtures/debug.toml");

/// One scripted host event, in the `{ action, data }` shape the host uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "lowercase")]
pub enum DebugEvent {
    Notify(NotificationRequest),
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    events: Vec<DebugEvent>,
}

/// Parses a fixture file.
pub fn parse(text: &str) -> Result<Vec<DebugEvent>, toml::de::Error> {
    let file: FixtureFile = toml::from_str(text)?;
    Ok(file.events)
}

/// The sample set shipped with the binary.
pub fn builtin() -> Result<Vec<DebugEvent>, toml::de::Error> {
    parse(BUILTIN)
}
