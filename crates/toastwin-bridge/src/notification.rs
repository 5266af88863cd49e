use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// and selects the default icon and icon color when the request leaves them
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Indicates an error or failure that may affect functionality.
    Error,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
}

impl Category {
    /// Looks a category up by its wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Self::Error),
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Screen anchor of a notification.
///
/// `Top` and `Bottom` are legacy aliases kept for older callers; they are
/// normalized to their `*Center` counterparts before use. Any string that is
/// not a known position deserializes to [`Position::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Legacy alias of [`Position::TopCenter`].
    Top,
    /// Legacy alias of [`Position::BottomCenter`].
    Bottom,
    Unknown,
}

impl Position {
    /// Every value a position can take, aliases and the unknown marker included.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
        Position::Top,
        Position::Bottom,
        Position::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for Position {
    fn from(value: &str) -> Self {
        match value {
            "top-left" => Self::TopLeft,
            "top-center" => Self::TopCenter,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-center" => Self::BottomCenter,
            "bottom-right" => Self::BottomRight,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single style value: a CSS property value or a nested block keyed by
/// property name or selector fragment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Nested(BTreeMap<String, StyleValue>),
}

/// Caller-supplied style map. Top-level properties and selector fragments
/// (`".description"`) may be mixed. The engine never looks inside it.
pub type StyleOverrides = BTreeMap<String, StyleValue>;

/// A notification request as delivered by the host's event transport.
///
/// Every field is optional. Field names follow the host payload
/// (`camelCase`), and the older payload names (`id`, `type`, `duration`,
/// `showDuration`, `style`) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Upsert key. Requests sharing an identity replace each other instead of
    /// stacking. Numeric ids are accepted and stringified; an empty string is
    /// the same as no identity.
    #[serde(default, alias = "id", deserialize_with = "lenient_identity")]
    pub identity: Option<String>,
    pub title: Option<String>,
    /// Markdown text, rendered by the surface.
    pub description: Option<String>,
    /// Unknown category names are treated as absent.
    #[serde(default, alias = "type", deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    /// Symbolic icon name, or an image URL when it starts with `http` or `/`.
    pub icon: Option<String>,
    pub icon_animation: Option<String>,
    /// Free-form color text.
    pub icon_color: Option<String>,
    #[serde(alias = "duration")]
    pub duration_ms: Option<i64>,
    #[serde(alias = "showDuration")]
    pub show_countdown: Option<bool>,
    pub position: Option<Position>,
    #[serde(alias = "style")]
    pub style_overrides: Option<StyleOverrides>,
}

impl NotificationRequest {
    /// Returns `true` if the request carries a non-empty title or description.
    /// Requests without either are dropped by the engine.
    pub fn has_content(&self) -> bool {
        let present = |text: &Option<String>| text.as_deref().is_some_and(|t| !t.is_empty());
        present(&self.title) || present(&self.description)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentity {
    Text(String),
    Number(i64),
}

fn lenient_identity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawIdentity>::deserialize(deserializer)?;
    Ok(raw
        .map(|identity| match identity {
            RawIdentity::Text(text) => text,
            RawIdentity::Number(number) => number.to_string(),
        })
        .filter(|identity| !identity.is_empty()))
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Category::from_name))
}
