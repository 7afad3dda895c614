//! Interrupt-shared axis fields.
//!
//! One `AxisShared` cell per axis holds every field touched from interrupt
//! context: the microstep interrupt counts position and honors stops, the
//! encoder-overflow interrupt accumulates whole revolutions, and the tick
//! context reads all of it. Accesses are relaxed load/store only — the
//! target is a single core, each field is word-sized or smaller with a
//! single writer per direction, and avoiding read-modify-write atomics
//! keeps the crate usable on cores without compare-and-swap.

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicI8, AtomicU16, AtomicU8, Ordering};

use crate::motion::Direction;

use super::phase::AxisPhase;

/// Fields shared between interrupt context and the scheduler tick.
#[derive(Debug)]
pub struct AxisShared {
    /// Step counter; incremented by the microstep interrupt while moving.
    position: AtomicI32,
    /// Move destination; frozen to `position` when a manual stop lands.
    target: AtomicI32,
    /// Stop latch; set by callers or the limit-switch policy, cleared when
    /// the interrupt honors it.
    stop: AtomicBool,
    /// Encoded [`AxisPhase`]; the interrupt resets it to idle on stop.
    phase: AtomicU8,
    /// Travel direction sign, written while the step timer is stopped.
    direction: AtomicI8,
    /// Intra-step pulse counter; interrupt context only.
    microstep: AtomicU16,
    /// Whole encoder revolutions accumulated by the overflow interrupt,
    /// in ticks.
    encoder_base: AtomicI32,
}

impl AxisShared {
    /// A fresh cell: stopped at position zero.
    pub const fn new() -> Self {
        Self {
            position: AtomicI32::new(0),
            target: AtomicI32::new(0),
            stop: AtomicBool::new(false),
            phase: AtomicU8::new(AxisPhase::Idle.as_u8()),
            direction: AtomicI8::new(1),
            microstep: AtomicU16::new(0),
            encoder_base: AtomicI32::new(0),
        }
    }

    /// Current step position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position.load(Ordering::Relaxed)
    }

    /// Rewrite the step position. Only legal while the axis is stopped
    /// (homing zero, idle encoder correction).
    #[inline]
    pub fn set_position(&self, position: i32) {
        self.position.store(position, Ordering::Relaxed);
    }

    /// Advance the step position by the travel direction.
    #[inline]
    pub fn step(&self) {
        let next = self.position().wrapping_add(self.direction().sign());
        self.position.store(next, Ordering::Relaxed);
    }

    /// Current move destination.
    #[inline]
    pub fn target(&self) -> i32 {
        self.target.load(Ordering::Relaxed)
    }

    /// Set the move destination.
    #[inline]
    pub fn set_target(&self, target: i32) {
        self.target.store(target, Ordering::Relaxed);
    }

    /// Whether a stop is pending.
    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Latch a stop; honored at the next full-step boundary.
    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Clear the latch after honoring it.
    #[inline]
    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }

    /// Current profile phase.
    #[inline]
    pub fn phase(&self) -> AxisPhase {
        AxisPhase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    /// Set the profile phase.
    #[inline]
    pub fn set_phase(&self, phase: AxisPhase) {
        self.phase.store(phase.as_u8(), Ordering::Relaxed);
    }

    /// Current travel direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.direction.load(Ordering::Relaxed) < 0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Set the travel direction.
    #[inline]
    pub fn set_direction(&self, direction: Direction) {
        self.direction
            .store(direction.sign() as i8, Ordering::Relaxed);
    }

    /// Count one microstep pulse; true once every `per_step` pulses, when
    /// the axis completes a full step.
    #[inline]
    pub fn advance_microstep(&self, per_step: u16) -> bool {
        let next = self.microstep.load(Ordering::Relaxed) + 1;
        if next >= per_step {
            self.microstep.store(0, Ordering::Relaxed);
            true
        } else {
            self.microstep.store(next, Ordering::Relaxed);
            false
        }
    }

    /// Forget a partial step (move setup and re-initialization).
    #[inline]
    pub fn reset_microstep(&self) {
        self.microstep.store(0, Ordering::Relaxed);
    }

    /// Accumulated encoder base, ticks.
    #[inline]
    pub fn encoder_base(&self) -> i32 {
        self.encoder_base.load(Ordering::Relaxed)
    }

    /// Rewrite the encoder base (repositioning, homing zero).
    #[inline]
    pub fn set_encoder_base(&self, ticks: i32) {
        self.encoder_base.store(ticks, Ordering::Relaxed);
    }

    /// Shift the encoder base by one revolution worth of ticks.
    #[inline]
    pub fn add_encoder_base(&self, ticks: i32) {
        let next = self.encoder_base().wrapping_add(ticks);
        self.encoder_base.store(next, Ordering::Relaxed);
    }
}

impl Default for AxisShared {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_direction() {
        let shared = AxisShared::new();

        shared.set_direction(Direction::Positive);
        shared.step();
        shared.step();
        assert_eq!(shared.position(), 2);

        shared.set_direction(Direction::Negative);
        shared.step();
        assert_eq!(shared.position(), 1);
    }

    #[test]
    fn test_microstep_full_step_boundary() {
        let shared = AxisShared::new();

        for _ in 0..15 {
            assert!(!shared.advance_microstep(16));
        }
        assert!(shared.advance_microstep(16));
        // counter wrapped; the next full step needs 16 more pulses
        assert!(!shared.advance_microstep(16));
    }

    #[test]
    fn test_stop_latch() {
        let shared = AxisShared::new();

        assert!(!shared.stop_requested());
        shared.request_stop();
        assert!(shared.stop_requested());
        shared.clear_stop();
        assert!(!shared.stop_requested());
    }

    #[test]
    fn test_phase_round_trip() {
        let shared = AxisShared::new();

        assert_eq!(shared.phase(), AxisPhase::Idle);
        shared.set_phase(AxisPhase::Decelerating);
        assert_eq!(shared.phase(), AxisPhase::Decelerating);
    }

    #[test]
    fn test_encoder_base_accumulates() {
        let shared = AxisShared::new();

        shared.add_encoder_base(4000);
        shared.add_encoder_base(-4000);
        shared.add_encoder_base(-4000);
        assert_eq!(shared.encoder_base(), -4000);
    }
}
