//! Tick-owned planning state.
//!
//! Everything here is read and written from the scheduler tick only; the
//! fields interrupt context needs live in [`super::shared::AxisShared`].

use crate::config::units::Millis;
use crate::motion::MoveGeometry;

use super::phase::MotionIntent;

/// Per-axis ramp bookkeeping for the move in progress.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisState {
    /// Geometry of the active move.
    pub(crate) geometry: MoveGeometry,
    /// Commanded speed, full steps per second.
    pub(crate) current_speed: u32,
    /// Speed captured on deceleration entry; the decel ramp descends
    /// from here.
    pub(crate) start_speed: u32,
    /// Start of the active ramp segment.
    pub(crate) accel_start: Millis,
    /// Why the axis is moving.
    pub(crate) intent: MotionIntent,
}

impl AxisState {
    pub(crate) const fn idle() -> Self {
        Self {
            geometry: MoveGeometry::idle(),
            current_speed: 0,
            start_speed: 0,
            accel_start: Millis(0),
            intent: MotionIntent::Idle,
        }
    }

    /// Arm a new move: ramps restart from the floor speed at `now`.
    pub(crate) fn arm(&mut self, geometry: MoveGeometry, min_speed: u32, now: Millis) {
        self.geometry = geometry;
        self.current_speed = min_speed;
        self.start_speed = min_speed;
        self.accel_start = now;
    }

    /// Enter the deceleration ramp: descend from the speed reached so far.
    pub(crate) fn enter_decel(&mut self, now: Millis) {
        self.start_speed = self.current_speed;
        self.accel_start = now;
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::idle()
    }
}
