//! # Configuration
//!
//! One TOML file, one table per subsystem:
//!
//! ```toml
//! [entities]
//! start_id = 0
//! max_count = 1000000
//!
//! [pool]
//! initial_capacity = 1024
//!
//! [spatial]
//! chunk_size = 16
//! ```
//!
//! Every table and every key is optional.

use std::path::Path;

use serde::Deserialize;
use tessera_core::{EntityConfig, PoolConfig};
use tessera_spatial::SpatialConfig;

use crate::error::TesseraResult;

/// Combined configuration for every Tessera subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Entity id range.
    pub entities: EntityConfig,
    /// Pool sizing.
    pub pool: PoolConfig,
    /// Chunk sizing.
    pub spatial: SpatialConfig,
}

impl TesseraConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed TOML, or the first section that
    /// fails validation.
    pub fn from_toml_str(text: &str) -> TesseraResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> TesseraResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> TesseraResult<()> {
        self.entities.validate()?;
        self.pool.validate()?;
        self.spatial.validate()?;
        Ok(())
    }
}
