//! Error types for stepper-axes library.
//!
//! Provides unified error handling across configuration and motion control.

use core::fmt;

use crate::axis::{AxisPhase, HomingStage};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-axes operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Move request or homing error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, ..., 512)
    InvalidMicrosteps(u16),
    /// Configuration does not describe the expected number of axes
    AxisCount {
        /// Axes the controller was built for
        expected: usize,
        /// Axes found in the configuration
        found: usize,
    },
    /// Invalid speed range (requires 0 < min <= max)
    InvalidSpeedRange {
        /// Configured minimum speed (steps/s)
        min: u16,
        /// Configured maximum speed (steps/s)
        max: u16,
    },
    /// Maximum speed exceeds the supported bound
    SpeedTooHigh(u16),
    /// Invalid acceleration (must be 1..=100 steps/s²)
    InvalidAcceleration(u16),
    /// Invalid travel bound (must be 1..=i32::MAX steps)
    InvalidTravel(u32),
    /// Invalid motor resolution (full steps per revolution must be > 0)
    InvalidStepsPerRev(u16),
    /// Invalid encoder resolution (ticks per revolution)
    InvalidEncoderResolution(u32),
    /// Invalid stall detection band (requires 0 < min < max ticks per step)
    InvalidStallBand {
        /// Lower bound, encoder ticks per full step
        min: u16,
        /// Upper bound, encoder ticks per full step
        max: u16,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Move request and homing errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Axis is busy; moves are only accepted while idle
    NotIdle(AxisPhase),
    /// Target lies outside the configured travel or equals the current position
    OutOfRange {
        /// Requested absolute target (steps)
        target: i32,
        /// Configured travel bound (steps, symmetric about zero)
        limit: u32,
    },
    /// A homing stage failed to issue its move; the axis is parked in error
    HomingAborted(HomingStage),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256, 512", v)
            }
            ConfigError::AxisCount { expected, found } => {
                write!(f, "Configuration has {} axes, controller expects {}", found, expected)
            }
            ConfigError::InvalidSpeedRange { min, max } => {
                write!(f, "Invalid speed range: min {} must satisfy 0 < min <= max ({})", min, max)
            }
            ConfigError::SpeedTooHigh(v) => {
                write!(f, "Max speed {} exceeds supported bound {}", v, crate::config::MAX_SPEED_LIMIT)
            }
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be 1..={}", v, crate::config::MAX_ACCELERATION)
            }
            ConfigError::InvalidTravel(v) => {
                write!(f, "Invalid travel bound: {}. Must be 1..={}", v, i32::MAX)
            }
            ConfigError::InvalidStepsPerRev(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidEncoderResolution(v) => {
                write!(
                    f,
                    "Invalid encoder resolution: {}. Must cover at least one tick per full step, at most {}",
                    v,
                    crate::config::MAX_ENCODER_TICKS
                )
            }
            ConfigError::InvalidStallBand { min, max } => {
                write!(f, "Invalid stall band: requires 0 < min ({}) < max ({})", min, max)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::NotIdle(phase) => write!(f, "Axis busy in phase {}", phase),
            MotionError::OutOfRange { target, limit } => {
                write!(f, "Target {} out of range (travel +/-{}, must differ from current position)", target, limit)
            }
            MotionError::HomingAborted(stage) => {
                write!(f, "Homing aborted in stage {}", stage)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
