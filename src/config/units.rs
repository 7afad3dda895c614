//! Unit types for physical quantities.
//!
//! Provides validated microstep divisors and a wrapping millisecond
//! timestamp to prevent unit confusion at compile time. Positions and
//! speeds stay plain integers (full steps and full steps per second); the
//! controller's arithmetic is integer end to end.

use serde::Deserialize;

use crate::error::ConfigError;

/// Microstep divisor (1, 2, 4, 8, ..., 512).
///
/// Validated at construction to be a power of 2 within the valid range,
/// so the timer period math can always shift by `log2(microsteps)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);
    /// Maximum supported resolution (512th step).
    pub const MAX: Self = Self(512);

    /// Valid microstep values.
    const VALID_VALUES: [u16; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Microsteps per full step expressed as a bit shift (log2 of the divisor).
    #[inline]
    pub const fn shift(self) -> u8 {
        self.0.trailing_zeros() as u8
    }

    /// Check if a value is valid.
    #[inline]
    pub fn is_valid(value: u16) -> bool {
        Self::VALID_VALUES.contains(&value)
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Monotonic millisecond timestamp with wrapping arithmetic.
///
/// The scheduler tick and the acceleration ramps only ever look at
/// differences, so the counter is free to wrap (a u32 of milliseconds wraps
/// after ~49.7 days of uptime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Create a new timestamp.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, wrapping-correct.
    #[inline]
    pub const fn since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl core::ops::Add<u32> for Millis {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Self(self.0.wrapping_add(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsteps_valid_values() {
        for &v in &Microsteps::VALID_VALUES {
            assert!(Microsteps::new(v).is_ok());
        }
    }

    #[test]
    fn test_microsteps_invalid_values() {
        assert!(Microsteps::new(0).is_err());
        assert!(Microsteps::new(3).is_err());
        assert!(Microsteps::new(17).is_err());
        assert!(Microsteps::new(1024).is_err());
    }

    #[test]
    fn test_microsteps_shift() {
        assert_eq!(Microsteps::FULL.shift(), 0);
        assert_eq!(Microsteps::SIXTEENTH.shift(), 4);
        assert_eq!(Microsteps::MAX.shift(), 9);
    }

    #[test]
    fn test_millis_since() {
        assert_eq!(Millis(110).since(Millis(100)), 10);
        assert_eq!(Millis(5).since(Millis(u32::MAX - 4)), 10);
    }

    #[test]
    fn test_millis_add_wraps() {
        assert_eq!(Millis(u32::MAX) + 1, Millis(0));
    }
}
