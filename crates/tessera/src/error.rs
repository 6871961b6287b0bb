//! # Tessera Error Types

use thiserror::Error;

use tessera_core::CoreError;
use tessera_spatial::SpatialError;

/// Errors surfaced by the umbrella crate.
#[derive(Error, Debug)]
pub enum TesseraError {
    /// Kernel error (entity range, components, pools).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Spatial index error.
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// Config file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for umbrella operations.
pub type TesseraResult<T> = Result<T, TesseraError>;
