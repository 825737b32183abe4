use crate::pool::counters::{PoolCounters, PoolHandle};
use crate::pool::facade::PoolFacade;
use crate::pool::history::{parse_window_spec, StatsRecorder};
use crate::pool::types::{PoolDefinition, PoolSnapshot, PoolStatistics};
use crate::utils::error::{PoolscopeError, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// How often the background sampler visits each pool.
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

struct MonitoredPool {
    definition: PoolDefinition,
    started: DateTime<Utc>,
    counters: Arc<PoolCounters>,
    recorder: Option<StatsRecorder>,
}

/// In-memory facade provider.
///
/// Holds the registered pool definitions, their live counters and their
/// rolling statistics windows. The monitor endpoint reads through the
/// `PoolFacade` impl; the owning application writes through the
/// `PoolHandle` returned at registration.
pub struct PoolRegistry {
    order: RwLock<Vec<String>>,
    pools: DashMap<String, MonitoredPool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self {
            order: RwLock::new(Vec::new()),
            pools: DashMap::new(),
        }
    }

    /// Register a pool and return the write side of its counters.
    ///
    /// Fails if the alias is already taken, the connection counts are
    /// inconsistent, or the statistics window description does not parse.
    pub fn register(&self, definition: PoolDefinition) -> Result<PoolHandle> {
        if definition.minimum_connection_count > definition.maximum_connection_count {
            return Err(PoolscopeError::Config(format!(
                "Pool '{}': minimum connection count {} exceeds maximum {}",
                definition.alias,
                definition.minimum_connection_count,
                definition.maximum_connection_count
            )));
        }

        let started = Utc::now();
        let recorder = match definition.statistics.as_deref() {
            Some(spec) => Some(StatsRecorder::new(parse_window_spec(spec)?, started)),
            None => None,
        };

        let alias = definition.alias.clone();
        let counters = Arc::new(PoolCounters::default());
        let pool = MonitoredPool {
            definition,
            started,
            counters: Arc::clone(&counters),
            recorder,
        };

        {
            let mut order = self.order.write().expect("registry order poisoned");
            if self.pools.contains_key(&alias) {
                return Err(PoolscopeError::Config(format!(
                    "Pool alias '{}' is already registered",
                    alias
                )));
            }
            self.pools.insert(alias.clone(), pool);
            order.push(alias.clone());
        }

        info!(alias = %alias, "Registered pool");
        Ok(PoolHandle::new(counters))
    }

    /// Visit every pool once, feeding its statistics recorder.
    fn sample_all(&self, now: DateTime<Utc>) {
        for pool in self.pools.iter() {
            if let Some(recorder) = &pool.recorder {
                recorder.sample(&pool.counters, now);
            }
        }
    }

    /// Spawn the background task that drives statistics windows.
    pub fn start_sampler(self: Arc<Self>) {
        debug!("Statistics sampler started");
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SAMPLE_INTERVAL);
            loop {
                interval.tick().await;
                self.sample_all(Utc::now());
            }
        });
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolFacade for PoolRegistry {
    fn aliases(&self) -> Vec<String> {
        self.order.read().expect("registry order poisoned").clone()
    }

    fn definition(&self, alias: &str) -> Result<PoolDefinition> {
        let pool = self
            .pools
            .get(alias)
            .ok_or_else(|| PoolscopeError::UnknownAlias(alias.to_string()))?;
        Ok(pool.definition.clone())
    }

    fn snapshot(&self, alias: &str) -> Result<PoolSnapshot> {
        let pool = self
            .pools
            .get(alias)
            .ok_or_else(|| PoolscopeError::UnknownAlias(alias.to_string()))?;
        Ok(PoolSnapshot {
            snapshot_date: Utc::now(),
            date_started: pool.started,
            active_connection_count: pool.counters.active(),
            available_connection_count: pool.counters.available(),
            offline_connection_count: pool.counters.offline(),
            maximum_connection_count: pool.definition.maximum_connection_count,
            served_count: pool.counters.served(),
            refused_count: pool.counters.refused(),
        })
    }

    fn statistics(&self, alias: &str) -> Result<Vec<PoolStatistics>> {
        let pool = self
            .pools
            .get(alias)
            .ok_or_else(|| PoolscopeError::UnknownAlias(alias.to_string()))?;
        Ok(pool
            .recorder
            .as_ref()
            .map(StatsRecorder::windows)
            .unwrap_or_default())
    }
}
