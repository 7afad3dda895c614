//! Configuration module for stepper-axes.
//!
//! Provides types for loading and validating per-axis controller
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod kinematics;
mod limits;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, EncoderConfig};
pub use kinematics::Kinematics;
pub use limits::LimitPolicy;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Millis};

/// Most axes a single configuration can describe.
pub const MAX_AXES: usize = 8;

/// Supported speed ceiling, steps/s.
pub const MAX_SPEED_LIMIT: u16 = 10_000;

/// Supported ramp slope ceiling, steps/s².
pub const MAX_ACCELERATION: u16 = 100;

/// Supported encoder resolution ceiling, ticks per revolution.
pub const MAX_ENCODER_TICKS: u32 = 100_000;
