//! Move geometry calculation.
//!
//! Decides between trapezoidal and triangular velocity profiles and computes
//! the position where deceleration must begin. All math is integer: steps
//! are exact counts and the timer quantization downstream is integer
//! division, so nothing here may round through floats.

/// Direction of axis travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward larger step counts.
    Positive,
    /// Toward smaller step counts.
    Negative,
}

impl Direction {
    /// Get direction from a signed step delta.
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        if delta >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// The opposite direction (used for reversed motor wiring).
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Whether `position` has reached or passed `target` traveling this way.
    #[inline]
    pub fn has_reached(self, position: i32, target: i32) -> bool {
        match self {
            Direction::Positive => position >= target,
            Direction::Negative => position <= target,
        }
    }
}

/// Shape of a planned move's velocity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileKind {
    /// Reaches max speed and cruises before decelerating.
    Trapezoid,
    /// Too short to reach max speed; deceleration starts at the midpoint.
    Triangle,
}

/// Planned geometry for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveGeometry {
    /// Direction of travel.
    pub direction: Direction,
    /// Position at which deceleration must begin.
    pub decel_start: i32,
    /// Profile shape.
    pub kind: ProfileKind,
}

impl MoveGeometry {
    /// Placeholder geometry for an axis with no move in progress.
    pub const fn idle() -> Self {
        Self {
            direction: Direction::Positive,
            decel_start: 0,
            kind: ProfileKind::Triangle,
        }
    }

    /// Plan a move from `position` to `target`.
    ///
    /// `accel_steps` is the ramp length (steps from standstill to max
    /// speed, `max_speed² / (2 · accel)`). A move longer than both ramps is
    /// a trapezoid with `decel_start` exactly `accel_steps` short of the
    /// target; anything shorter is a triangle decelerating from the
    /// midpoint. Expects `position != target` (callers validate); equal
    /// inputs yield a degenerate triangle with `decel_start == position`.
    pub fn plan(position: i32, target: i32, accel_steps: u32) -> Self {
        let delta = target as i64 - position as i64;
        let direction = Direction::from_delta(delta);
        let distance = delta.unsigned_abs();

        if distance > 2 * accel_steps as u64 {
            Self {
                direction,
                decel_start: target - direction.sign() * accel_steps as i32,
                kind: ProfileKind::Trapezoid,
            }
        } else {
            Self {
                direction,
                decel_start: position + direction.sign() * (distance / 2) as i32,
                kind: ProfileKind::Triangle,
            }
        }
    }

    /// Whether `position` has crossed the deceleration point.
    #[inline]
    pub fn past_decel_start(&self, position: i32) -> bool {
        self.direction.has_reached(position, self.decel_start)
    }
}

/// Speed on an acceleration ramp after `elapsed_ms` milliseconds.
///
/// The ramp is linear: `floor + accel · elapsed / 1000`. Callers clamp the
/// result to max speed.
#[inline]
pub fn accel_ramp(floor: u32, accel: u32, elapsed_ms: u32) -> u32 {
    let gained = accel as u64 * elapsed_ms as u64 / 1000;
    (floor as u64 + gained).min(u32::MAX as u64) as u32
}

/// Speed on a deceleration ramp after `elapsed_ms` milliseconds.
///
/// Linear ramp down from `start`, saturating at zero. Callers floor the
/// result at min speed.
#[inline]
pub fn decel_ramp(start: u32, accel: u32, elapsed_ms: u32) -> u32 {
    let lost = accel as u64 * elapsed_ms as u64 / 1000;
    start.saturating_sub(lost.min(u32::MAX as u64) as u32)
}
