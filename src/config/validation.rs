//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{SystemConfig, MAX_ACCELERATION, MAX_ENCODER_TICKS, MAX_SPEED_LIMIT};

/// Validate a system configuration.
///
/// Checks, per axis:
/// - Speed range ordering (0 < min <= max) and the supported speed ceiling
/// - Acceleration within the supported ramp range
/// - Travel bound fits a signed step counter
/// - Motor resolution is nonzero
/// - Encoder resolution covers at least one tick per full step
/// - Stall band ordering (0 < min < max)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for axis in config.axes.iter() {
        validate_axis(axis)?;
    }

    Ok(())
}

fn validate_axis(config: &super::AxisConfig) -> Result<()> {
    if config.min_speed == 0 || config.min_speed > config.max_speed {
        return Err(Error::Config(ConfigError::InvalidSpeedRange {
            min: config.min_speed,
            max: config.max_speed,
        }));
    }

    if config.max_speed > MAX_SPEED_LIMIT {
        return Err(Error::Config(ConfigError::SpeedTooHigh(config.max_speed)));
    }

    if config.acceleration == 0 || config.acceleration > MAX_ACCELERATION {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            config.acceleration,
        )));
    }

    if config.max_steps == 0 || config.max_steps > i32::MAX as u32 {
        return Err(Error::Config(ConfigError::InvalidTravel(config.max_steps)));
    }

    if config.steps_per_rev == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRev(
            config.steps_per_rev,
        )));
    }

    if let Some(ref encoder) = config.encoder {
        // Below one tick per full step the fused position query divides by
        // zero; above the bound the hardware counter cannot span one rev.
        if encoder.ticks_per_rev < config.steps_per_rev as u32
            || encoder.ticks_per_rev > MAX_ENCODER_TICKS
        {
            return Err(Error::Config(ConfigError::InvalidEncoderResolution(
                encoder.ticks_per_rev,
            )));
        }

        if encoder.min_ticks_per_step == 0
            || encoder.min_ticks_per_step >= encoder.max_ticks_per_step
        {
            return Err(Error::Config(ConfigError::InvalidStallBand {
                min: encoder.min_ticks_per_step,
                max: encoder.max_ticks_per_step,
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Microsteps;
    use crate::config::{AxisConfig, EncoderConfig, LimitPolicy};

    fn valid_axis() -> AxisConfig {
        AxisConfig {
            steps_per_rev: 200,
            microsteps: Microsteps::SIXTEENTH,
            acceleration: 80,
            max_speed: 2000,
            min_speed: 50,
            max_steps: 50_000,
            reverse: false,
            hold_on_stop: true,
            limit_switch: LimitPolicy::Ignore,
            keep_position: false,
            encoder: None,
        }
    }

    fn config_with(axis: AxisConfig) -> SystemConfig {
        let mut config = SystemConfig::default();
        config.axes.push(axis).unwrap();
        config
    }

    #[test]
    fn test_valid_axis_passes() {
        assert!(validate_config(&config_with(valid_axis())).is_ok());
    }

    #[test]
    fn test_zero_min_speed() {
        let mut axis = valid_axis();
        axis.min_speed = 0;

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSpeedRange { .. }))
        ));
    }

    #[test]
    fn test_inverted_speed_range() {
        let mut axis = valid_axis();
        axis.min_speed = 3000;

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSpeedRange { .. }))
        ));
    }

    #[test]
    fn test_speed_ceiling() {
        let mut axis = valid_axis();
        axis.max_speed = MAX_SPEED_LIMIT + 1;

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::SpeedTooHigh(_)))
        ));
    }

    #[test]
    fn test_zero_acceleration() {
        let mut axis = valid_axis();
        axis.acceleration = 0;

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidAcceleration(0)))
        ));
    }

    #[test]
    fn test_travel_must_fit_i32() {
        let mut axis = valid_axis();
        axis.max_steps = i32::MAX as u32 + 1;

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidTravel(_)))
        ));
    }

    #[test]
    fn test_encoder_too_coarse() {
        let mut axis = valid_axis();
        axis.encoder = Some(EncoderConfig {
            ticks_per_rev: 100, // fewer ticks than full steps per rev
            reverse: false,
            min_ticks_per_step: 1,
            max_ticks_per_step: 2,
            stall_threshold: 3,
        });

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidEncoderResolution(100)))
        ));
    }

    #[test]
    fn test_stall_band_ordering() {
        let mut axis = valid_axis();
        axis.encoder = Some(EncoderConfig {
            ticks_per_rev: 4000,
            reverse: false,
            min_ticks_per_step: 25,
            max_ticks_per_step: 15,
            stall_threshold: 3,
        });

        let result = validate_config(&config_with(axis));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStallBand { min: 25, max: 15 }))
        ));
    }
}
