//! Axis motion phase and motion intent.
//!
//! `AxisPhase` is the profile engine's state: what the speed ramp is doing
//! right now. `MotionIntent` is why the axis is moving: a direct move, a
//! homing stage, or nothing. The two advance separately — homing watches
//! the phase fall back to idle between its stages.

use core::fmt;

/// Profile-engine state of one axis.
///
/// Stored in the shared cell as a `u8` because the microstep interrupt
/// resets it to `Idle` when a move ends while the tick context reads and
/// advances it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AxisPhase {
    /// Stopped; moves are accepted.
    Idle = 0,
    /// Ramping up toward max speed.
    Accelerating = 1,
    /// Holding max speed.
    Cruising = 2,
    /// Ramping down toward min speed.
    Decelerating = 3,
    /// Creeping at min speed until the target or a stop.
    Creeping = 4,
    /// Parked after a failure; cleared only by re-initialization.
    Fault = 5,
}

impl AxisPhase {
    /// Encode for the atomic cell.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode from the atomic cell. Unknown values park the axis.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => AxisPhase::Idle,
            1 => AxisPhase::Accelerating,
            2 => AxisPhase::Cruising,
            3 => AxisPhase::Decelerating,
            4 => AxisPhase::Creeping,
            _ => AxisPhase::Fault,
        }
    }

    /// Whether the axis is between move start and stop.
    #[inline]
    pub const fn is_moving(self) -> bool {
        matches!(
            self,
            AxisPhase::Accelerating
                | AxisPhase::Cruising
                | AxisPhase::Decelerating
                | AxisPhase::Creeping
        )
    }
}

impl fmt::Display for AxisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisPhase::Idle => "idle",
            AxisPhase::Accelerating => "accel",
            AxisPhase::Cruising => "cruise",
            AxisPhase::Decelerating => "decel",
            AxisPhase::Creeping => "creep",
            AxisPhase::Fault => "fault",
        };
        f.write_str(name)
    }
}

/// Stage of an in-progress homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingStage {
    /// Fast travel toward the limit switch.
    Fast,
    /// Short positive move off the switch.
    BackOff,
    /// Slow negative creep back onto the switch.
    Approach,
}

impl fmt::Display for HomingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HomingStage::Fast => "fast",
            HomingStage::BackOff => "backoff",
            HomingStage::Approach => "approach",
        };
        f.write_str(name)
    }
}

/// Why an axis is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionIntent {
    /// No purpose pending; the axis answers only to direct commands.
    #[default]
    Idle,
    /// A caller-requested move is running.
    Direct,
    /// A homing sequence owns the axis.
    Homing(HomingStage),
}

impl MotionIntent {
    /// Whether a homing sequence currently owns the axis.
    #[inline]
    pub const fn is_homing(self) -> bool {
        matches!(self, MotionIntent::Homing(_))
    }
}
