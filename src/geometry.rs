//! Geometry engine: pure functions mapping a rectangle and a cursor (or a
//! movement vector) to a 3-D tilt.
//!
//! Nothing here holds state. The card state machine calls these with the
//! rectangle it just read from its provider and with raw pointer data, and
//! hands the resulting [`Rotation`] to the renderer. The axis always lies in
//! the card's own X/Y plane (`z == 0`); the tilt amount is a fraction of a
//! full turn bounded by the caller's `max_turns`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DRAG_VELOCITY, MAX_TURNS};

/// A point in page or card-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 2-D offset: distance from center, pointer movement, or drag velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        hypotenuse(self.x, self.y)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Bounding rectangle of the card in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

/// Rotation axis. Not normalized; `z` is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axis {
    pub const NONE: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// An axis plus a signed fraction of a full revolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub axis: Axis,
    pub turns: f64,
}

impl Rotation {
    /// No tilt at all.
    pub const FLAT: Self = Self {
        axis: Axis::NONE,
        turns: 0.0,
    };

    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.turns == 0.0
    }
}

/// Cursor position relative to the rectangle's top-left corner.
#[must_use]
pub fn relative_cursor_position(rect: &Rect, cursor: Point) -> Vector {
    Vector {
        x: cursor.x - rect.left,
        y: cursor.y - rect.top,
    }
}

/// Offset of `relative` from the center of a rectangle of size `dims`.
///
/// Called with `relative = (0, 0)` this yields the negated half-diagonal,
/// which serves as the normalization reference for the turns ratio.
#[must_use]
pub fn distance_from_center(dims: Dimensions, relative: Vector) -> Vector {
    Vector {
        x: relative.x - dims.width / 2.0,
        y: relative.y - dims.height / 2.0,
    }
}

/// `sqrt(a² + b²)`, exact when either leg is zero.
#[must_use]
pub fn hypotenuse(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

/// Axis perpendicular to the center-to-cursor vector, so the card tilts away
/// from the cursor.
///
/// `x` is `+1` when the cursor is at or above the center and `-1` below it.
/// `y` carries the tangent of the perpendicular angle, positive when the
/// cursor is right of center and negative otherwise. On the horizontal
/// midline that tangent diverges, so `y` becomes very large; callers must
/// tolerate it. At the exact center the axis is whatever `atan2(0, 0)`
/// produces, which is harmless because the turns ratio is zero there.
#[must_use]
pub fn rotation_axis(distance: Vector) -> Axis {
    let angle = distance.y.atan2(distance.x);
    let ratio = (angle + FRAC_PI_2).tan();
    let magnitude = if ratio.is_nan() { 0.0 } else { ratio.abs() };

    Axis {
        x: if distance.y <= 0.0 { 1.0 } else { -1.0 },
        y: if distance.x > 0.0 {
            magnitude
        } else {
            -magnitude
        },
        z: 0.0,
    }
}

/// `|distance| / |max_distance|` in `[0, 1]`, or `0` when either is zero.
#[must_use]
pub fn rotation_turns_ratio(distance: Vector, max_distance: Vector) -> f64 {
    if distance.is_zero() || max_distance.is_zero() {
        return 0.0;
    }
    let ratio = distance.length() / max_distance.length();
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Proximity tilt for an idle card, using [`MAX_TURNS`].
#[must_use]
pub fn card_idle_rotation(rect: &Rect, cursor: Point) -> Rotation {
    card_idle_rotation_with(rect, cursor, MAX_TURNS)
}

/// Proximity tilt for an idle card: the cursor's offset from center,
/// normalized against the rectangle's half-diagonal and scaled by `max_turns`.
#[must_use]
pub fn card_idle_rotation_with(rect: &Rect, cursor: Point, max_turns: f64) -> Rotation {
    let dims = rect.dimensions();
    let distance = distance_from_center(dims, relative_cursor_position(rect, cursor));
    let max_distance = distance_from_center(dims, Vector::ZERO);

    Rotation {
        axis: rotation_axis(distance),
        turns: max_turns * rotation_turns_ratio(distance, max_distance),
    }
}

/// Drag tilt from a movement vector, using [`MAX_TURNS`] and [`MAX_DRAG_VELOCITY`].
#[must_use]
pub fn card_dragging_rotation(movement: Vector) -> Rotation {
    card_dragging_rotation_with(movement, MAX_TURNS, MAX_DRAG_VELOCITY)
}

/// Drag tilt: same axis and ratio math as the idle case, but normalized
/// against `max_velocity` on both axes instead of rectangle geometry.
#[must_use]
pub fn card_dragging_rotation_with(
    movement: Vector,
    max_turns: f64,
    max_velocity: f64,
) -> Rotation {
    let max_distance = Vector {
        x: max_velocity,
        y: max_velocity,
    };

    Rotation {
        axis: rotation_axis(movement),
        turns: max_turns * rotation_turns_ratio(movement, max_distance),
    }
}

/// Whether `cursor` lies strictly inside `rect`; points on an edge are outside.
#[must_use]
pub fn is_cursor_in_bounding_rectangle(rect: &Rect, cursor: Point) -> bool {
    cursor.x > rect.left
        && cursor.x < rect.right()
        && cursor.y > rect.top
        && cursor.y < rect.bottom()
}
