//! The card interaction state machine.
//!
//! A [`Card`] turns pointer events and animation ticks into a rotation for
//! the renderer. While idle it tilts towards a hovering cursor. Once pressed
//! and moved it tracks the drag: movement deltas accumulate into a bounded
//! velocity that drives the tilt and decays back to zero on every tick, so
//! the card keeps easing after the pointer stops.
//!
//! Handlers return the [`Action`]s the host should apply; the same values are
//! also available through the query methods for hosts that poll.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::TiltConfig;
use crate::geometry::{self, Point, Rect, Rotation, Vector};
use crate::input::{InputState, InteractionMode, PointerEvent, Transition};

/// Source of the card's live bounding rectangle.
///
/// Called synchronously on every pointer event that needs geometry; the
/// result is never cached across events.
pub trait RectangleProvider {
    fn bounding_rect(&self) -> Rect;
}

impl RectangleProvider for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

impl<F> RectangleProvider for F
where
    F: Fn() -> Rect,
{
    fn bounding_rect(&self) -> Rect {
        self()
    }
}

/// Changes the host should render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Apply `rotation`, animating over `transition`.
    Rotated {
        rotation: Rotation,
        transition: Transition,
    },
    /// Move the card so its top-left corner sits at `position`.
    Moved { position: Point },
}

/// State for one card. Cards never share state with each other.
pub struct Card<P> {
    provider: P,
    config: TiltConfig,
    input: InputState,
    velocity: Vector,
    rotation: Rotation,
    transition: Transition,
    position: Option<Point>,
}

impl<P: RectangleProvider> Card<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, TiltConfig::default())
    }

    /// Build a card with custom limits. A config that fails
    /// [`TiltConfig::validate`] is replaced by the defaults.
    #[must_use]
    pub fn with_config(provider: P, config: TiltConfig) -> Self {
        Self {
            provider,
            config: config.or_default(),
            input: InputState::Idle,
            velocity: Vector::ZERO,
            rotation: Rotation::FLAT,
            transition: Transition::Instant,
            position: None,
        }
    }

    // --- Input events ---

    /// Dispatch any event to its handler.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        match event {
            PointerEvent::Down { offset } => self.on_pointer_down(offset),
            PointerEvent::Move { page, movement } => self.on_pointer_move(page, movement),
            PointerEvent::Up => self.on_pointer_up(),
            PointerEvent::Leave => self.on_pointer_leave(),
            PointerEvent::Tick => self.on_tick(),
        }
    }

    /// Button pressed at `offset` within the card.
    pub fn on_pointer_down(&mut self, offset: Point) -> Vec<Action> {
        if matches!(self.input, InputState::Idle) {
            self.set_state(InputState::Pressed { origin: offset });
        }
        Vec::new()
    }

    /// Pointer moved to `page`, travelling `movement` since the previous move.
    pub fn on_pointer_move(&mut self, page: Point, movement: Vector) -> Vec<Action> {
        match self.input {
            InputState::Idle => self.idle_move(page),
            InputState::Pressed { origin } => {
                self.set_state(InputState::Dragging { origin });
                self.drag_move(origin, page, movement)
            }
            InputState::Dragging { origin } => self.drag_move(origin, page, movement),
        }
    }

    /// Button released.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let was_dragging = matches!(self.input, InputState::Dragging { .. });
        self.set_state(InputState::Idle);
        self.velocity = Vector::ZERO;
        if was_dragging {
            self.flatten()
        } else {
            Vec::new()
        }
    }

    /// Pointer left the card. Only an idle card reacts.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        match self.input {
            InputState::Idle => self.flatten(),
            InputState::Pressed { .. } | InputState::Dragging { .. } => Vec::new(),
        }
    }

    /// One animation frame: while dragging, re-derive the tilt from the
    /// current velocity and then decay it.
    pub fn on_tick(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::Dragging { .. }) {
            return Vec::new();
        }
        let rotation = self.drag_rotation();
        self.velocity = Vector {
            x: decay_towards_zero(self.velocity.x, self.config.decay_step),
            y: decay_towards_zero(self.velocity.y, self.config.decay_step),
        };
        trace!(
            vx = self.velocity.x,
            vy = self.velocity.y,
            turns = rotation.turns,
            "drag tick"
        );
        vec![self.rotate(rotation, Transition::Drag)]
    }

    // --- Handlers per state ---

    fn idle_move(&mut self, page: Point) -> Vec<Action> {
        let rect = self.provider.bounding_rect();
        if !geometry::is_cursor_in_bounding_rectangle(&rect, page) {
            return Vec::new();
        }
        let rotation = geometry::card_idle_rotation_with(&rect, page, self.config.max_turns);
        vec![self.rotate(rotation, Transition::Instant)]
    }

    fn drag_move(&mut self, origin: Point, page: Point, movement: Vector) -> Vec<Action> {
        let limit = self.config.max_drag_velocity;
        self.velocity = Vector {
            x: accumulate(self.velocity.x, movement.x, limit),
            y: accumulate(self.velocity.y, movement.y, limit),
        };

        let position = Point {
            x: page.x - origin.x,
            y: page.y - origin.y,
        };
        self.position = Some(position);

        let rotation = self.drag_rotation();
        vec![
            Action::Moved { position },
            self.rotate(rotation, Transition::Drag),
        ]
    }

    fn drag_rotation(&self) -> Rotation {
        geometry::card_dragging_rotation_with(
            self.velocity,
            self.config.max_turns,
            self.config.max_drag_velocity,
        )
    }

    fn flatten(&mut self) -> Vec<Action> {
        vec![self.rotate(Rotation::FLAT, Transition::Settle)]
    }

    fn rotate(&mut self, rotation: Rotation, transition: Transition) -> Action {
        self.rotation = rotation;
        self.transition = transition;
        Action::Rotated {
            rotation,
            transition,
        }
    }

    fn set_state(&mut self, next: InputState) {
        if self.input.mode() != next.mode() {
            debug!(from = ?self.input.mode(), to = ?next.mode(), "card mode transition");
        }
        self.input = next;
    }

    // --- Queries ---

    /// The rotation most recently produced.
    #[must_use]
    pub fn current_rotation(&self) -> Rotation {
        self.rotation
    }

    /// Transition hint for [`Self::current_rotation`].
    #[must_use]
    pub fn current_transition(&self) -> Transition {
        self.transition
    }

    /// [`Self::current_transition`] resolved to a duration.
    #[must_use]
    pub fn current_transition_speed(&self) -> Duration {
        self.transition.duration(&self.config)
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.input.mode()
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// Accumulated drag velocity.
    #[must_use]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Offset captured at press time, while a button is held.
    #[must_use]
    pub fn press_origin(&self) -> Option<Point> {
        self.input.origin()
    }

    /// Where the last drag placed the card, if it has ever been dragged.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Limits in effect, after validation.
    #[must_use]
    pub fn config(&self) -> &TiltConfig {
        &self.config
    }
}

/// Add `delta` to `value`, keeping the result within `±|limit|`. A NaN
/// step or limit leaves `value` unchanged.
fn accumulate(value: f64, delta: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    let next = value + delta;
    if next.is_nan() || limit.is_nan() {
        value
    } else {
        next.clamp(-limit, limit)
    }
}

/// Step `value` towards zero by `step`, landing exactly on zero instead of
/// crossing it.
fn decay_towards_zero(value: f64, step: f64) -> f64 {
    if value.abs() <= step {
        0.0
    } else {
        value - step.copysign(value)
    }
}
