//! Input model: pointer events, the interaction state, and transition hints.
//!
//! `PointerEvent` is everything the host forwards to a card. `InputState` is
//! the gesture currently being tracked, carrying the press origin captured on
//! pointer-down so the drag handler can reposition the card. `Transition`
//! tells the renderer how quickly to animate towards a new rotation.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TiltConfig;
use crate::geometry::{Point, Vector};

/// A discrete event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed; `offset` is the pointer position within the card.
    Down { offset: Point },
    /// Pointer moved to `page`, having travelled `movement` since the last move.
    Move { page: Point, movement: Vector },
    /// Button released.
    Up,
    /// Pointer left the card.
    Leave,
    /// One animation frame elapsed.
    Tick,
}

/// Which gesture phase a card is in, without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// Internal state for the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No button held; the card tilts towards the cursor while it hovers.
    #[default]
    Idle,
    /// Button held, pointer not yet moved.
    Pressed {
        /// Pointer offset within the card at press time.
        origin: Point,
    },
    /// Button held and the pointer has moved at least once.
    Dragging {
        /// Pointer offset within the card at press time.
        origin: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Pressed { .. } => InteractionMode::Pressed,
            Self::Dragging { .. } => InteractionMode::Dragging,
        }
    }

    /// The press origin, if a button is held.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        match *self {
            Self::Idle => None,
            Self::Pressed { origin } | Self::Dragging { origin } => Some(origin),
        }
    }
}

/// How the renderer should animate towards the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Jump straight to the new rotation (idle cursor tracking).
    #[default]
    Instant,
    /// Short ease while a drag is in progress.
    Drag,
    /// Slow settle back to flat after release or leave.
    Settle,
}

impl Transition {
    /// Concrete duration for this hint under `config`.
    #[must_use]
    pub fn duration(self, config: &TiltConfig) -> Duration {
        match self {
            Self::Instant => config.instant,
            Self::Drag => config.drag,
            Self::Settle => config.settle,
        }
    }
}
