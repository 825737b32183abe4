pub mod counters;
pub mod facade;
pub mod history;
pub mod registry;
pub mod types;

pub use counters::{PoolCounters, PoolHandle};
pub use facade::PoolFacade;
pub use registry::PoolRegistry;
pub use types::{PoolDefinition, PoolSnapshot, PoolStatistics};
