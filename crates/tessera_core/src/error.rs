//! # Core Error Types
//!
//! Every variant here is a programmer error. The panicking entry points
//! (`create_entity`, `register_component`, `deallocate`, ...) report these
//! through their Display text; the `try_*` twins hand them back instead.
//!
//! Expected absence (a missing component, a dead handle, an empty cell) is
//! never an error and is modelled with `Option`/`bool`.

use thiserror::Error;

/// Errors raised by the core kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The entity manager ran out of ids in its configured range.
    #[error("allocating outside of range: {max_count} ids starting at {start_id} are all issued")]
    EntityCapacityExceeded {
        /// First id of the manager's range.
        start_id: u64,
        /// Number of ids the manager may issue.
        max_count: u64,
    },

    /// A component type was registered a second time.
    #[error("component {0} registered twice")]
    ComponentAlreadyRegistered(&'static str),

    /// A component type was used before being registered.
    #[error("component {0} not registered")]
    ComponentNotRegistered(&'static str),

    /// A pool handle that does not refer to a live slot was deallocated.
    #[error("invalid pointer deallocation: slot {index} (pool capacity {capacity})")]
    InvalidDeallocation {
        /// Slot index carried by the handle.
        index: usize,
        /// Pool capacity at the time of the call.
        capacity: usize,
    },

    /// A configuration section holds a value the kernel cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
