use crate::pool::types::{PoolDefinition, PoolSnapshot, PoolStatistics};
use crate::utils::error::Result;

/// Read interface the monitor consumes.
///
/// `PoolRegistry` is the bundled implementation; a pool engine that tracks
/// its own state can implement this directly and hand the monitor an
/// `Arc<dyn PoolFacade>` instead.
///
/// Lookups of an alias that was never registered fail with
/// `PoolscopeError::UnknownAlias`. All methods read live state; nothing is
/// cached between calls.
pub trait PoolFacade: Send + Sync {
    /// Known aliases in registration order.
    fn aliases(&self) -> Vec<String>;

    fn definition(&self, alias: &str) -> Result<PoolDefinition>;

    fn snapshot(&self, alias: &str) -> Result<PoolSnapshot>;

    /// Completed statistics windows, oldest first. Empty when statistics
    /// are disabled for the pool.
    fn statistics(&self, alias: &str) -> Result<Vec<PoolStatistics>>;
}
