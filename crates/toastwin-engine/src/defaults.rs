//! Default resolution for inbound notification requests.
//!
//! Every field a request leaves unset is filled from its [`Category`] or from
//! the configured [`NotificationDefaults`]. Resolution never fails: the only
//! request that does not resolve is one with nothing to show.

use toastwin_bridge::config::NotificationDefaults;
use toastwin_bridge::notification::{Category, NotificationRequest, Position, StyleOverrides};
use toastwin_bridge::render::{IconSource, IconVariant};

use crate::color::{self, Rgba};

/// A request with every presentation field decided. Frozen once an instance
/// is created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub identity: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub icon: IconSource,
    pub icon_animation: Option<String>,
    pub icon_color: String,
    pub icon_variant: IconVariant,
    pub duration_ms: u64,
    pub show_countdown: bool,
    pub position: Position,
    pub style_overrides: Option<StyleOverrides>,
}

/// Resolves `request` against `defaults`.
///
/// Returns `None` when the request has neither a title nor a description;
/// such requests are dropped without creating an instance.
pub fn resolve(
    request: NotificationRequest,
    defaults: &NotificationDefaults,
) -> Option<ResolvedRequest> {
    if !request.has_content() {
        return None;
    }
    let title = request.title.filter(|title| !title.is_empty());
    let description = request.description.filter(|text| !text.is_empty());

    let category = request.category;
    let icon = match request.icon.filter(|icon| !icon.is_empty()) {
        Some(icon) if is_image_url(&icon) => IconSource::Image(icon),
        Some(icon) => IconSource::Symbol(icon),
        None => IconSource::Symbol(default_icon(category).to_string()),
    };

    let icon_color = match request.icon_color.filter(|color| !color.is_empty()) {
        Some(color) => color::canonicalize(&color),
        None => default_icon_color(category).to_string(),
    };

    let icon_variant = match Rgba::parse(&icon_color) {
        Some(color) if !color.is_opaque() => IconVariant::Plain,
        _ => IconVariant::Light,
    };

    let duration_ms = match request.duration_ms {
        Some(duration) if duration > 0 => duration as u64,
        _ => defaults.default_duration_ms,
    };

    Some(ResolvedRequest {
        identity: request.identity.filter(|identity| !identity.is_empty()),
        title,
        description,
        category,
        icon,
        icon_animation: request.icon_animation,
        icon_color,
        icon_variant,
        duration_ms,
        show_countdown: request
            .show_countdown
            .unwrap_or(defaults.default_show_countdown),
        position: normalize_position(request.position.unwrap_or(defaults.default_position)),
        style_overrides: request.style_overrides,
    })
}

/// Maps the legacy `top`/`bottom` aliases onto their centered positions.
pub fn normalize_position(position: Position) -> Position {
    match position {
        Position::Top => Position::TopCenter,
        Position::Bottom => Position::BottomCenter,
        other => other,
    }
}

/// Symbolic icon shown when the request does not name one.
pub fn default_icon(category: Option<Category>) -> &'static str {
    match category {
        Some(Category::Error) => "circle-xmark",
        Some(Category::Success) => "circle-check",
        Some(Category::Warning) => "circle-exclamation",
        Some(Category::Info) | None => "circle-info",
    }
}

/// Icon color used when the request does not supply one.
pub fn default_icon_color(category: Option<Category>) -> &'static str {
    match category {
        Some(Category::Error) => "#f03e3e",
        Some(Category::Success) => "#12b886",
        Some(Category::Warning) => "#fab005",
        Some(Category::Info) | None => "#9c27b0",
    }
}

/// Accent of a category, used for the title and the background gradient.
pub fn accent(category: Option<Category>) -> Rgba {
    match category {
        Some(Category::Error) => Rgba::opaque(240, 62, 62),
        Some(Category::Success) => Rgba::opaque(18, 184, 134),
        Some(Category::Warning) => Rgba::opaque(250, 176, 5),
        Some(Category::Info) | None => Rgba::opaque(156, 39, 176),
    }
}

pub fn title_color(category: Option<Category>) -> String {
    let Rgba { r, g, b, .. } = accent(category);
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn background_gradient(category: Option<Category>) -> String {
    let Rgba { r, g, b, .. } = accent(category);
    format!("linear-gradient(to top right, rgba({r}, {g}, {b}, 0.6), rgba(0,0,0,0.6))")
}

fn is_image_url(icon: &str) -> bool {
    icon.starts_with("http") || icon.starts_with('/')
}
