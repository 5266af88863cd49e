//! Presentation parameters handed from the engine to the render surface.
//!
//! The surface owns painting; everything in here is already resolved, so a
//! surface never has to apply defaults or timing policy on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notification::{Position, StyleOverrides};

/// Identity of a live notification instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceKey {
    /// Caller-supplied identity, subject to upsert-replace.
    Named(String),
    /// Generated token for requests without an identity. Never replaced.
    Anonymous(Uuid),
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(formatter, "{name}"),
            Self::Anonymous(token) => write!(formatter, "~{token}"),
        }
    }
}

/// Stage of an instance's reveal, countdown and exit sequence.
///
/// The declaration order is the only order in which phases are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    IconReveal,
    BackgroundReveal,
    ShadowReveal,
    ContentReveal,
    CountingDown,
    Exiting,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A translation distance along an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    Px(i32),
    /// Percentage of the notification's own extent along the axis.
    Percent(i32),
}

impl fmt::Display for Distance {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(formatter, "{value}px"),
            Self::Percent(value) => write!(formatter, "{value}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    EaseOut,
    EaseIn,
}

impl fmt::Display for Easing {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EaseOut => formatter.write_str("ease-out"),
            Self::EaseIn => formatter.write_str("ease-in"),
        }
    }
}

/// Visibility change an [`AnimationDescriptor`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Enter,
    Exit,
}

/// Resolved entrance or exit motion for one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub axis: Axis,
    pub distance_from: Distance,
    pub distance_to: Distance,
    pub duration_ms: u64,
    pub easing: Easing,
    pub opacity_from: f32,
    pub opacity_to: f32,
}

impl AnimationDescriptor {
    /// Renders the start and end transforms as CSS `translate` functions, for
    /// surfaces that drive CSS keyframes.
    pub fn to_css(&self) -> (String, String) {
        let axis = match self.axis {
            Axis::X => "X",
            Axis::Y => "Y",
        };
        (
            format!("translate{axis}({})", self.distance_from),
            format!("translate{axis}({})", self.distance_to),
        )
    }
}

/// Where the icon comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconSource {
    /// Symbolic name from the host's icon set.
    Symbol(String),
    /// Image fetched from a URL or host-relative path.
    Image(String),
}

/// Icon badge style. Translucent icon colors are drawn without the light
/// tinted badge so the alpha stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconVariant {
    Light,
    Plain,
}

/// Everything the surface needs to paint one notification at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub key: InstanceKey,
    /// Restart key for the countdown ring.
    pub generation: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Set when there is a description but no title; the surface uses the
    /// larger description style.
    pub description_only: bool,
    pub icon: IconSource,
    pub icon_animation: Option<String>,
    pub icon_color: String,
    pub icon_variant: IconVariant,
    pub title_color: String,
    /// Background fill, present once the background has started expanding.
    pub background: Option<String>,
    pub shadow_visible: bool,
    pub content_visible: bool,
    pub position: Position,
    pub phase: Phase,
    pub remaining_percent: u8,
    pub show_countdown: bool,
    /// Motion to play with this frame, set on entrance and on exit.
    pub animation: Option<AnimationDescriptor>,
    pub style_overrides: Option<StyleOverrides>,
}
