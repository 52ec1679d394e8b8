//! Tilt configuration, optionally overridden from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::consts::{
    DEFAULT_TICK_INTERVAL_MS, DRAG_TRANSITION_MS, DRAG_VELOCITY_DECAY_STEP, INSTANT_TRANSITION_MS,
    MAX_DRAG_VELOCITY, MAX_TURNS, SETTLE_TRANSITION_MS,
};
use crate::error::ConfigError;

/// Largest tilt accepted from configuration; beyond half a turn the card
/// would face away from the viewer.
const MAX_CONFIGURABLE_TURNS: f64 = 0.5;

/// Limits and timings for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    /// Tilt at full deflection, as a fraction of a turn.
    pub max_turns: f64,
    /// Per-axis bound on accumulated drag velocity.
    pub max_drag_velocity: f64,
    /// Velocity removed per tick on each axis.
    pub decay_step: f64,
    /// Transition when snapping back to flat.
    pub settle: Duration,
    /// Transition while dragging.
    pub drag: Duration,
    /// Transition while idle tilt tracks the cursor.
    pub instant: Duration,
    /// Period of the animation tick.
    pub tick_interval: Duration,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_TURNS,
            max_drag_velocity: MAX_DRAG_VELOCITY,
            decay_step: DRAG_VELOCITY_DECAY_STEP,
            settle: Duration::from_millis(SETTLE_TRANSITION_MS),
            drag: Duration::from_millis(DRAG_TRANSITION_MS),
            instant: Duration::from_millis(INSTANT_TRANSITION_MS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl TiltConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `TILT_MAX_TURNS`: default 0.1
    /// - `TILT_MAX_DRAG_VELOCITY`: default 40
    /// - `TILT_DECAY_STEP`: default 3
    /// - `TILT_SETTLE_MS`: default 1000
    /// - `TILT_DRAG_MS`: default 200
    /// - `TILT_TICK_MS`: default 16
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            max_turns: env_parse("TILT_MAX_TURNS", defaults.max_turns)?,
            max_drag_velocity: env_parse("TILT_MAX_DRAG_VELOCITY", defaults.max_drag_velocity)?,
            decay_step: env_parse("TILT_DECAY_STEP", defaults.decay_step)?,
            settle: Duration::from_millis(env_parse("TILT_SETTLE_MS", SETTLE_TRANSITION_MS)?),
            drag: Duration::from_millis(env_parse("TILT_DRAG_MS", DRAG_TRANSITION_MS)?),
            instant: defaults.instant,
            tick_interval: Duration::from_millis(env_parse(
                "TILT_TICK_MS",
                DEFAULT_TICK_INTERVAL_MS,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the rotation or velocity invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let turns_ok = self.max_turns.is_finite()
            && self.max_turns > 0.0
            && self.max_turns <= MAX_CONFIGURABLE_TURNS;
        if !turns_ok {
            return Err(ConfigError::OutOfRange {
                field: "max_turns",
                value: self.max_turns,
            });
        }
        if !(self.max_drag_velocity.is_finite() && self.max_drag_velocity > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "max_drag_velocity",
                value: self.max_drag_velocity,
            });
        }
        if !(self.decay_step.is_finite() && self.decay_step > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "decay_step",
                value: self.decay_step,
            });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::OutOfRange {
                field: "tick_interval",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// This config if it validates, otherwise the defaults.
    #[must_use]
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                warn!(%err, "invalid tilt config, using defaults");
                Self::default()
            }
        }
    }
}

fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Parse { var, value: raw }),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
    }
}
