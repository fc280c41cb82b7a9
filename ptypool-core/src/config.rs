//! Pool configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use ptypool_utils::{PtyPoolError, Result};

/// Configuration for a PTY pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of master endpoints created at start
    pub pool_size: u32,
    /// Name prefix for master endpoints
    pub master_prefix: String,
    /// Name prefix for slave endpoints
    pub slave_prefix: String,
    /// Byte capacity of each unidirectional channel
    pub channel_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            master_prefix: "ptm".into(),
            slave_prefix: "pts".into(),
            channel_capacity: 4096,
        }
    }
}

impl PoolConfig {
    /// Set the pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Set the master and slave name prefixes
    pub fn with_prefixes(
        mut self,
        master_prefix: impl Into<String>,
        slave_prefix: impl Into<String>,
    ) -> Self {
        self.master_prefix = master_prefix.into();
        self.slave_prefix = slave_prefix.into();
        self
    }

    /// Set the per-channel buffer capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| PtyPoolError::config(format!("invalid pool config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(PtyPoolError::config("pool_size must be nonzero"));
        }
        if self.master_prefix.is_empty() || self.slave_prefix.is_empty() {
            return Err(PtyPoolError::config("endpoint prefixes must be nonempty"));
        }
        if self.master_prefix == self.slave_prefix {
            return Err(PtyPoolError::config(
                "master and slave prefixes must differ",
            ));
        }
        if self.channel_capacity == 0 {
            return Err(PtyPoolError::config("channel_capacity must be nonzero"));
        }
        Ok(())
    }

    /// Name of the master endpoint with the given id
    pub fn master_name(&self, id: u32) -> String {
        format!("{}{}", self.master_prefix, id)
    }

    /// Name of the slave endpoint with the given id
    pub fn slave_name(&self, id: u32) -> String {
        format!("{}{}", self.slave_prefix, id)
    }
}
