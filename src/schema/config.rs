//! Schema pool configuration

use crate::{Error, Result};

/// Tuning knobs for a [`SchemaPool`](super::SchemaPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    sweep_interval: usize,
    initial_capacity: usize,
}

impl PoolConfig {
    /// Schema creations between automatic sweeps of dead entries.
    pub const DEFAULT_SWEEP_INTERVAL: usize = 1024;

    /// Pre-sized entry capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

    /// Create a new config builder
    #[must_use]
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::default()
    }

    /// Schema creations between automatic sweeps.
    #[must_use]
    pub const fn sweep_interval(&self) -> usize {
        self.sweep_interval
    }

    /// Initial entry capacity of the pool map.
    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Self::DEFAULT_SWEEP_INTERVAL,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Builder for [`PoolConfig`]
#[derive(Debug, Clone)]
pub struct PoolConfigBuilder {
    sweep_interval: usize,
    initial_capacity: usize,
}

impl Default for PoolConfigBuilder {
    fn default() -> Self {
        let defaults = PoolConfig::default();
        Self {
            sweep_interval: defaults.sweep_interval,
            initial_capacity: defaults.initial_capacity,
        }
    }
}

impl PoolConfigBuilder {
    /// Sweep dead entries after this many schema creations
    #[must_use]
    pub const fn sweep_interval(mut self, interval: usize) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Pre-size the pool map
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Build the config
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `sweep_interval` is zero
    pub fn build(self) -> Result<PoolConfig> {
        if self.sweep_interval == 0 {
            return Err(Error::InvalidConfig(
                "sweep_interval must be at least 1".to_string(),
            ));
        }
        Ok(PoolConfig {
            sweep_interval: self.sweep_interval,
            initial_capacity: self.initial_capacity,
        })
    }
}
