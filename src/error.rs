//! Error types.
//!
//! The geometry engine and the card state machine have no failure paths;
//! degenerate geometry yields a flat rotation instead. The only fallible
//! surface is loading configuration from the environment.

/// Failure while loading a [`crate::config::TiltConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: &'static str, value: String },

    /// An environment variable was set but is not valid unicode.
    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },

    /// A value parsed but lies outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}
