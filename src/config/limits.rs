//! Limit-switch reaction policy.

use serde::Deserialize;

use crate::motion::Direction;

/// What a triggered limit switch does to a moving axis.
///
/// Evaluated once per microstep interrupt while the switch reads active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Switch is informational only; motion continues.
    #[default]
    Ignore,
    /// Stop regardless of travel direction.
    StopAny,
    /// Stop only when traveling toward negative positions (the switch sits
    /// at the negative end of travel; positive moves may back off it).
    StopNegative,
}

impl LimitPolicy {
    /// Whether an active switch stops an axis traveling in `travel`.
    #[inline]
    pub fn should_stop(self, travel: Direction) -> bool {
        match self {
            LimitPolicy::Ignore => false,
            LimitPolicy::StopAny => true,
            LimitPolicy::StopNegative => travel == Direction::Negative,
        }
    }
}
