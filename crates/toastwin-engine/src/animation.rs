//! Entrance and exit motion per position.

use toastwin_bridge::notification::Position;
use toastwin_bridge::render::{AnimationDescriptor, Axis, Distance, Easing, Transition};

use crate::defaults::normalize_position;

pub const ENTER_DURATION_MS: u64 = 200;
pub const EXIT_DURATION_MS: u64 = 400;

/// Vertical offset the entrance starts from, away from the anchored edge.
const ENTER_OFFSET_PX: i32 = 30;

/// Builds the motion for `position` entering or leaving the screen.
///
/// Enter slides in vertically from just outside the anchored edge. Exit
/// slides towards the nearest screen edge; positions without one exit to the
/// right.
pub fn describe(position: Position, transition: Transition) -> AnimationDescriptor {
    let position = normalize_position(position);
    match transition {
        Transition::Enter => enter(position),
        Transition::Exit => exit(position),
    }
}

fn enter(position: Position) -> AnimationDescriptor {
    let offset = match position {
        Position::BottomLeft | Position::BottomCenter | Position::BottomRight | Position::Bottom => {
            ENTER_OFFSET_PX
        }
        Position::TopLeft
        | Position::TopCenter
        | Position::TopRight
        | Position::Top
        | Position::Unknown => -ENTER_OFFSET_PX,
    };

    AnimationDescriptor {
        axis: Axis::Y,
        distance_from: Distance::Px(offset),
        distance_to: Distance::Px(0),
        duration_ms: ENTER_DURATION_MS,
        easing: Easing::EaseOut,
        opacity_from: 0.0,
        opacity_to: 1.0,
    }
}

fn exit(position: Position) -> AnimationDescriptor {
    let (axis, target) = match position {
        Position::TopRight | Position::BottomRight | Position::Unknown => (Axis::X, 100),
        Position::TopLeft | Position::BottomLeft => (Axis::X, -100),
        Position::TopCenter | Position::Top => (Axis::Y, -100),
        Position::BottomCenter | Position::Bottom => (Axis::Y, 100),
    };

    AnimationDescriptor {
        axis,
        distance_from: Distance::Px(0),
        distance_to: Distance::Percent(target),
        duration_ms: EXIT_DURATION_MS,
        easing: Easing::EaseIn,
        opacity_from: 1.0,
        opacity_to: 0.0,
    }
}
