use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

const TILT_VARS: [&str; 6] = [
    "TILT_MAX_TURNS",
    "TILT_MAX_DRAG_VELOCITY",
    "TILT_DECAY_STEP",
    "TILT_SETTLE_MS",
    "TILT_DRAG_MS",
    "TILT_TICK_MS",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize env access across tests and start from a clean slate.
fn env_guard() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    // SAFETY: every test touching these vars holds ENV_LOCK.
    unsafe {
        for var in TILT_VARS {
            std::env::remove_var(var);
        }
    }
    guard
}

fn set(var: &str, value: &str) {
    // SAFETY: callers hold ENV_LOCK.
    unsafe { std::env::set_var(var, value) };
}

#[test]
fn default_matches_constants() {
    let cfg = TiltConfig::default();
    assert!((cfg.max_turns - 0.1).abs() < f64::EPSILON);
    assert!((cfg.max_drag_velocity - 40.0).abs() < f64::EPSILON);
    assert!((cfg.decay_step - 3.0).abs() < f64::EPSILON);
    assert_eq!(cfg.settle, Duration::from_secs(1));
    assert_eq!(cfg.drag, Duration::from_millis(200));
    assert_eq!(cfg.instant, Duration::ZERO);
    assert_eq!(cfg.tick_interval, Duration::from_millis(16));
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_env_without_vars_is_default() {
    let _guard = env_guard();
    assert_eq!(TiltConfig::from_env().unwrap(), TiltConfig::default());
}

#[test]
fn from_env_reads_overrides() {
    let _guard = env_guard();
    set("TILT_MAX_TURNS", "0.25");
    set("TILT_MAX_DRAG_VELOCITY", "80");
    set("TILT_DECAY_STEP", " 5 ");
    set("TILT_SETTLE_MS", "500");
    set("TILT_DRAG_MS", "100");
    set("TILT_TICK_MS", "33");

    let cfg = TiltConfig::from_env().unwrap();
    assert!((cfg.max_turns - 0.25).abs() < f64::EPSILON);
    assert!((cfg.max_drag_velocity - 80.0).abs() < f64::EPSILON);
    assert!((cfg.decay_step - 5.0).abs() < f64::EPSILON);
    assert_eq!(cfg.settle, Duration::from_millis(500));
    assert_eq!(cfg.drag, Duration::from_millis(100));
    assert_eq!(cfg.tick_interval, Duration::from_millis(33));
}

#[test]
fn from_env_rejects_garbage() {
    let _guard = env_guard();
    set("TILT_MAX_DRAG_VELOCITY", "fast");

    let err = TiltConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parse {
            var: "TILT_MAX_DRAG_VELOCITY",
            ..
        }
    ));
    assert!(err.to_string().contains("fast"));
}

#[test]
fn from_env_rejects_out_of_range_turns() {
    let _guard = env_guard();
    set("TILT_MAX_TURNS", "0.75");

    let err = TiltConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "max_turns",
            ..
        }
    ));
}

#[test]
fn from_env_rejects_zero_tick() {
    let _guard = env_guard();
    set("TILT_TICK_MS", "0");

    let err = TiltConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "tick_interval",
            ..
        }
    ));
}

#[test]
fn validate_rejects_non_positive_limits() {
    let cfg = TiltConfig {
        decay_step: 0.0,
        ..TiltConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "decay_step",
            ..
        }
    ));

    let cfg = TiltConfig {
        max_drag_velocity: -1.0,
        ..TiltConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "max_drag_velocity",
            ..
        }
    ));

    let cfg = TiltConfig {
        max_turns: f64::NAN,
        ..TiltConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "max_turns",
            ..
        }
    ));
}

#[test]
fn or_default_keeps_valid_config() {
    let cfg = TiltConfig {
        max_turns: 0.25,
        decay_step: 1.5,
        ..TiltConfig::default()
    };
    assert_eq!(cfg.or_default(), cfg);
}

#[test]
fn or_default_replaces_invalid_config() {
    let cfg = TiltConfig {
        max_drag_velocity: -1.0,
        ..TiltConfig::default()
    };
    assert_eq!(cfg.or_default(), TiltConfig::default());

    let cfg = TiltConfig {
        max_turns: f64::NAN,
        tick_interval: Duration::ZERO,
        ..TiltConfig::default()
    };
    assert_eq!(cfg.or_default(), TiltConfig::default());
}
