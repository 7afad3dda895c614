//! Per-axis configuration from TOML.

use serde::Deserialize;

use super::limits::LimitPolicy;
use super::units::Microsteps;

/// Complete configuration for one stepper axis.
///
/// Loaded once before the controller starts and never mutated by it.
/// Positions and travel are in full steps; speeds in full steps per second;
/// acceleration in full steps per second squared.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Full steps per motor revolution (typically 200 for 1.8 degree motors).
    #[serde(default = "default_steps_per_rev")]
    pub steps_per_rev: u16,

    /// Microstep setting (1, 2, 4, 8, 16, ...).
    pub microsteps: Microsteps,

    /// Acceleration/deceleration ramp slope, steps/s².
    pub acceleration: u16,

    /// Cruise speed ceiling, steps/s.
    pub max_speed: u16,

    /// Start/stop speed floor, steps/s. Moves launch at this speed and
    /// creep at it after deceleration.
    pub min_speed: u16,

    /// Travel bound: accepted targets satisfy |target| <= max_steps.
    pub max_steps: u32,

    /// Invert the motor direction output.
    #[serde(default)]
    pub reverse: bool,

    /// Keep the motor energized while idle (holding torque).
    #[serde(default = "default_hold")]
    pub hold_on_stop: bool,

    /// Reaction to an active limit switch.
    #[serde(default)]
    pub limit_switch: LimitPolicy,

    /// While idle, correct the step counter from the encoder and re-issue
    /// the move if the axis was pushed off target. Requires an encoder.
    #[serde(default)]
    pub keep_position: bool,

    /// Optional quadrature encoder on this axis. Without one the stall
    /// detector is a no-op and position queries fall back to step counts.
    #[serde(default)]
    pub encoder: Option<EncoderConfig>,
}

fn default_steps_per_rev() -> u16 {
    200
}

fn default_hold() -> bool {
    true
}

impl AxisConfig {
    /// Whether this axis carries an encoder.
    #[inline]
    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }
}

/// Quadrature encoder parameters and stall detection band.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Encoder ticks per mechanical revolution (the hardware counter wraps
    /// once per revolution).
    pub ticks_per_rev: u32,

    /// Invert the encoder counting direction.
    #[serde(default)]
    pub reverse: bool,

    /// Healthy lower bound: encoder ticks observed per commanded full step.
    pub min_ticks_per_step: u16,

    /// Healthy upper bound: encoder ticks observed per commanded full step.
    pub max_ticks_per_step: u16,

    /// Consecutive out-of-band checks tolerated (with speed backoff)
    /// before the move is stopped as a confirmed stall.
    #[serde(default = "default_stall_threshold")]
    pub stall_threshold: u8,
}

fn default_stall_threshold() -> u8 {
    3
}
