// Poolscope - read-only HTTP monitoring endpoint for named resource pools

pub mod api;
pub mod chart;
pub mod config;
pub mod monitor;
pub mod pool;
pub mod utils;

// Re-export commonly used types
pub use utils::error::{PoolscopeError, Result};
