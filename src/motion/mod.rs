//! Motion module for stepper-axes.
//!
//! Pure move-geometry planning and timer period quantization. Everything
//! here is free of hardware and controller state so it can be tested
//! exhaustively on its own.

mod profile;
mod timer;

pub use profile::{accel_ramp, decel_ramp, Direction, MoveGeometry, ProfileKind};
pub use timer::{StepRate, TimerScale};
