//! Crate-level error types.

use std::fmt;

/// Errors produced by the robo-eyes crate.
#[derive(Debug)]
pub enum EyesError {
    /// Generic I/O failure (reading or writing configuration files).
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A required configuration field is absent (dotted path).
    MissingField(&'static str),
    /// The interface named in `[screen]` has no matching sub-section.
    MissingInterfaceSection(&'static str),
    /// The `[screen]` interface is not one we know how to describe.
    UnsupportedInterface(String),
    /// No driver with this identifier is registered.
    UnsupportedDriver(String),
    /// A configuration value is present but out of range.
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The display sink failed to accept a frame.
    Sink(std::io::Error),
    /// Failed to spawn the render thread.
    ThreadSpawn(std::io::Error),
    /// The command was dropped by a cancel request before it converged.
    Cancelled,
    /// The render thread is no longer running.
    EngineStopped,
}

impl fmt::Display for EyesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::MissingField(field) => {
                write!(f, "missing required field '{field}'")
            }
            Self::MissingInterfaceSection(section) => write!(
                f,
                "missing '[screen.{section}]' section for {section} interface"
            ),
            Self::UnsupportedInterface(name) => {
                write!(f, "unsupported interface type: {name}")
            }
            Self::UnsupportedDriver(name) => {
                write!(f, "unsupported driver: {name}")
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{field}': {reason}")
            }
            Self::Sink(e) => write!(f, "display sink error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Cancelled => f.write_str("command cancelled"),
            Self::EngineStopped => f.write_str("render engine is not running"),
        }
    }
}

impl std::error::Error for EyesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Sink(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EyesError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
