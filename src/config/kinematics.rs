//! Kinematic constants derived from axis configuration.

use super::axis::AxisConfig;

/// Derived per-axis parameters computed from configuration.
///
/// These are computed once at controller construction and used for all
/// motion planning; nothing here changes at runtime.
#[derive(Debug, Clone)]
pub struct Kinematics {
    /// Steps needed to ramp between standstill and max speed at the
    /// configured acceleration: `max_speed² / (2 · acceleration)`.
    pub accel_steps: u32,

    /// Microsteps per full step as a bit shift (log2 of the divisor).
    pub microstep_shift: u8,

    /// Travel bound as a signed step count.
    pub travel: i32,

    /// Cruise speed ceiling, steps/s.
    pub max_speed: u32,

    /// Start/stop speed floor, steps/s.
    pub min_speed: u32,

    /// Ramp slope, steps/s².
    pub acceleration: u32,

    /// Encoder ticks per full step, when an encoder is configured.
    pub ticks_per_step: Option<i32>,
}

impl Kinematics {
    /// Compute kinematic constants from an axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        let max_speed = config.max_speed as u32;
        let min_speed = config.min_speed as u32;
        let acceleration = config.acceleration as u32;

        let accel_steps = if acceleration > 0 {
            max_speed * max_speed / acceleration / 2
        } else {
            0
        };

        let ticks_per_step = config.encoder.as_ref().and_then(|enc| {
            if config.steps_per_rev > 0 {
                Some((enc.ticks_per_rev / config.steps_per_rev as u32) as i32)
            } else {
                None
            }
        });

        Self {
            accel_steps,
            microstep_shift: config.microsteps.shift(),
            travel: config.max_steps.min(i32::MAX as u32) as i32,
            max_speed,
            min_speed,
            acceleration,
            ticks_per_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Microsteps;
    use crate::config::{EncoderConfig, LimitPolicy};

    fn make_test_config() -> AxisConfig {
        AxisConfig {
            steps_per_rev: 200,
            microsteps: Microsteps::SIXTEENTH,
            acceleration: 100,
            max_speed: 2000,
            min_speed: 50,
            max_steps: 1000,
            reverse: false,
            hold_on_stop: true,
            limit_switch: LimitPolicy::Ignore,
            keep_position: false,
            encoder: None,
        }
    }

    #[test]
    fn test_accel_steps() {
        let kin = Kinematics::from_config(&make_test_config());

        // 2000² / (2 · 100) = 20000
        assert_eq!(kin.accel_steps, 20_000);
    }

    #[test]
    fn test_microstep_shift() {
        let kin = Kinematics::from_config(&make_test_config());
        assert_eq!(kin.microstep_shift, 4);
    }

    #[test]
    fn test_ticks_per_step() {
        let mut config = make_test_config();
        let kin = Kinematics::from_config(&config);
        assert_eq!(kin.ticks_per_step, None);

        config.encoder = Some(EncoderConfig {
            ticks_per_rev: 4000,
            reverse: false,
            min_ticks_per_step: 15,
            max_ticks_per_step: 25,
            stall_threshold: 3,
        });
        let kin = Kinematics::from_config(&config);

        // 4000 ticks/rev over 200 steps/rev
        assert_eq!(kin.ticks_per_step, Some(20));
    }
}
