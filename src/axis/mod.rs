//! Per-axis state.
//!
//! Splits along the interrupt boundary: [`AxisShared`] holds the fields
//! interrupt context touches, [`AxisState`] the planning fields owned by
//! the scheduler tick. The profile phase, stall detector, and homing
//! sequencer live here too.

mod homing;
mod phase;
mod shared;
mod stall;
mod state;

pub use phase::{AxisPhase, HomingStage, MotionIntent};
pub use stall::StallCheck;

pub(crate) use homing::{next_action, HomingAction, APPROACH_STEPS, BACKOFF_STEPS};
pub(crate) use shared::AxisShared;
pub(crate) use stall::StallDetector;
pub(crate) use state::AxisState;
