//! Step-pulse timer period quantization.
//!
//! Converts a requested speed into the integer reload value of the
//! hardware step timer and back. The round trip matters: the period is an
//! integer, so the speed an axis actually runs at is quantized, and the
//! rest of the controller works with the realized value, never the
//! requested one.

/// Fixed properties of the step-pulse timers.
///
/// One pulse fires per timer period; `microsteps` pulses advance the axis
/// one full step, hence the shift in the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerScale {
    /// Timer input clock after prescaling, Hz.
    pub tick_hz: u32,
    /// Smallest reload value the hardware tolerates (fastest pulse rate).
    pub min_period: u16,
}

/// A quantized timer setting: the reload value and the speed it realizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepRate {
    /// Timer reload value.
    pub period: u16,
    /// Speed the clamped integer period actually delivers, steps/s.
    pub speed: u32,
}

impl TimerScale {
    /// Describe a step timer by its post-prescale clock and minimum reload.
    pub const fn new(tick_hz: u32, min_period: u16) -> Self {
        Self { tick_hz, min_period }
    }

    /// Quantize a requested speed (full steps/s) for an axis whose
    /// microstep divisor is `1 << shift`.
    ///
    /// `period = (tick_hz / speed) >> shift`, clamped to
    /// `[min_period, 0xFFFF]`; the realized speed is recomputed from the
    /// clamped period. Zero inputs are lifted to one so the function is
    /// total.
    pub fn quantize(&self, speed: u32, shift: u8) -> StepRate {
        let speed = speed.max(1);
        let raw = (self.tick_hz / speed) >> shift;
        let floor = self.min_period.max(1) as u32;
        let period = raw.clamp(floor, 0xFFFF) as u16;
        let realized = (self.tick_hz / period as u32) >> shift;

        StepRate {
            period,
            speed: realized,
        }
    }
}
