//! System configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::axis::AxisConfig;
use super::MAX_AXES;

/// Root configuration structure from TOML.
///
/// Axes are ordered: the table at index `i` configures controller axis `i`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Per-axis configurations, in axis-index order.
    pub axes: Vec<AxisConfig, MAX_AXES>,
}

impl SystemConfig {
    /// Get an axis configuration by index.
    pub fn axis(&self, index: usize) -> Option<&AxisConfig> {
        self.axes.get(index)
    }

    /// Number of configured axes.
    #[inline]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Extract exactly `N` axis configurations for a fixed-size controller.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AxisCount` if the configuration does not hold
    /// exactly `N` axes.
    pub fn axis_array<const N: usize>(&self) -> Result<[AxisConfig; N]> {
        if self.axes.len() != N {
            return Err(Error::Config(ConfigError::AxisCount {
                expected: N,
                found: self.axes.len(),
            }));
        }
        Ok(core::array::from_fn(|i| self.axes[i].clone()))
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self { axes: Vec::new() }
    }
}
