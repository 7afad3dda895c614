//! Hardware abstraction.
//!
//! The controller drives each axis through [`AxisHardware`]: a step-pulse
//! timer, an enable output, a direction output, an optional end switch,
//! and an optional quadrature counter. On an MCU these map to timer
//! registers and GPIO writes, so the trait is infallible; a register
//! write has no recovery path from interrupt context. [`AxisPins`] covers
//! the pin half over any embedded-hal outputs for platforms that want it.
//!
//! Status lines (move setup, phase changes, stall reports) go through
//! [`StatusSink`] instead of a fixed serial port.

use embedded_hal::digital::OutputPin;

use crate::motion::Direction;

/// Per-axis peripherals the controller drives.
///
/// `period` is the full step-pulse division ratio; implementations
/// backing a count-to-`ARR` timer write `period - 1` to the register.
/// Direction here is physical: the controller has already folded in the
/// axis `reverse` flag.
pub trait AxisHardware {
    /// Program the step-pulse timer to fire every `period` counts.
    fn set_timer_period(&mut self, period: u16);

    /// Start step pulses.
    fn timer_start(&mut self);

    /// Stop step pulses.
    fn timer_stop(&mut self);

    /// Apply winding current.
    fn energize(&mut self);

    /// Release the windings.
    fn release(&mut self);

    /// Drive the direction output.
    fn set_direction(&mut self, direction: Direction);

    /// Whether the end switch is currently pressed.
    fn limit_active(&self) -> bool;

    /// Quadrature counter value, in `[0, ticks_per_rev)`.
    fn encoder_count(&self) -> u32;

    /// Rewrite the quadrature counter.
    fn set_encoder_count(&mut self, count: u32);

    /// Whether the quadrature counter was counting down when it last
    /// overflowed. Read from the overflow interrupt to pick the sign of
    /// the wrapped revolution.
    fn encoder_counting_down(&self) -> bool;
}

/// Receives one diagnostic line per controller event.
pub trait StatusSink {
    /// Deliver one line, without trailing newline.
    fn status_line(&mut self, line: &str);
}

/// Discards every status line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn status_line(&mut self, _line: &str) {}
}

/// A digital output refused to switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinError;

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "digital output refused to switch")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PinError {}

/// Enable and direction outputs for one axis over embedded-hal pins.
///
/// Platforms whose step timer lives elsewhere compose this into their
/// [`AxisHardware`] implementation for the pin half of the trait. Enable
/// is treated as active low by default, matching common driver boards.
pub struct AxisPins<EN, DIR> {
    enable: EN,
    direction: DIR,
    active_low_enable: bool,
    invert_direction: bool,
}

impl<EN, DIR> AxisPins<EN, DIR>
where
    EN: OutputPin,
    DIR: OutputPin,
{
    /// Wrap an enable and a direction output. Active-low enable, no
    /// direction inversion.
    pub fn new(enable: EN, direction: DIR) -> Self {
        Self {
            enable,
            direction,
            active_low_enable: true,
            invert_direction: false,
        }
    }

    /// Treat the enable output as active high.
    #[must_use]
    pub fn with_active_high_enable(mut self) -> Self {
        self.active_low_enable = false;
        self
    }

    /// Invert the direction output level.
    #[must_use]
    pub fn with_inverted_direction(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// Apply winding current.
    pub fn energize(&mut self) -> Result<(), PinError> {
        if self.active_low_enable {
            self.enable.set_low().map_err(|_| PinError)
        } else {
            self.enable.set_high().map_err(|_| PinError)
        }
    }

    /// Release the windings.
    pub fn release(&mut self) -> Result<(), PinError> {
        if self.active_low_enable {
            self.enable.set_high().map_err(|_| PinError)
        } else {
            self.enable.set_low().map_err(|_| PinError)
        }
    }

    /// Drive the direction output. Positive travel is the high level
    /// unless inverted.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), PinError> {
        let high = match direction {
            Direction::Positive => !self.invert_direction,
            Direction::Negative => self.invert_direction,
        };
        if high {
            self.direction.set_high().map_err(|_| PinError)
        } else {
            self.direction.set_low().map_err(|_| PinError)
        }
    }

    /// Release the wrapped pins.
    pub fn free(self) -> (EN, DIR) {
        (self.enable, self.direction)
    }
}
