//! # Memory Management
//!
//! Object pools that hand out index handles instead of raw pointers.

mod pool;

pub use pool::{PoolAllocator, PoolHandle};
