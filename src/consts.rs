//! Shared numeric constants for the tilt engine.

// ── Rotation ────────────────────────────────────────────────────

/// Largest tilt, as a fraction of a full turn (0.1 turn = 36°).
pub const MAX_TURNS: f64 = 0.1;

// ── Drag ────────────────────────────────────────────────────────

/// Per-axis bound on the accumulated drag velocity.
pub const MAX_DRAG_VELOCITY: f64 = 40.0;

/// Amount removed from each velocity component on every tick.
pub const DRAG_VELOCITY_DECAY_STEP: f64 = 3.0;

// ── Transitions ─────────────────────────────────────────────────

/// Transition used when snapping back to flat on release or leave.
pub const SETTLE_TRANSITION_MS: u64 = 1000;

/// Transition used while a drag is tracking the pointer.
pub const DRAG_TRANSITION_MS: u64 = 200;

/// Transition used while idle tilt tracks the cursor.
pub const INSTANT_TRANSITION_MS: u64 = 0;

// ── Scheduling ──────────────────────────────────────────────────

/// Default tick period, roughly one animation frame at 60 Hz.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
