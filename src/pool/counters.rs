use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Per-pool activity counters.
///
/// Gauges (active/available/offline) are owned by the pool engine and set
/// wholesale; served/refused/active-time only ever grow. The monitor reads
/// these with relaxed ordering - a snapshot is allowed to be a few
/// nanoseconds stale.
#[derive(Debug, Default)]
pub struct PoolCounters {
    active: AtomicU32,
    available: AtomicU32,
    offline: AtomicU32,
    served: AtomicU64,
    refused: AtomicU64,
    active_time_millis: AtomicU64,
}

impl PoolCounters {
    pub fn active(&self) -> u32 {
        self.active.load(Ordering::Relaxed)
    }

    pub fn available(&self) -> u32 {
        self.available.load(Ordering::Relaxed)
    }

    pub fn offline(&self) -> u32 {
        self.offline.load(Ordering::Relaxed)
    }

    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    pub fn refused(&self) -> u64 {
        self.refused.load(Ordering::Relaxed)
    }

    pub fn active_time_millis(&self) -> u64 {
        self.active_time_millis.load(Ordering::Relaxed)
    }
}

/// Write side of a registered pool's counters.
///
/// Returned by `PoolRegistry::register`; the owning application records
/// activity through it while the monitor reads the same counters.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    counters: Arc<PoolCounters>,
}

impl PoolHandle {
    pub(crate) fn new(counters: Arc<PoolCounters>) -> Self {
        Self { counters }
    }

    /// Record one served lease and how long it stayed active.
    #[inline]
    pub fn record_lease(&self, active_for: Duration) {
        self.counters.served.fetch_add(1, Ordering::Relaxed);
        self.counters
            .active_time_millis
            .fetch_add(active_for.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record one refused request.
    #[inline]
    pub fn record_refused(&self) {
        self.counters.refused.fetch_add(1, Ordering::Relaxed);
    }

    /// Publish the current connection gauges.
    #[inline]
    pub fn set_connection_counts(&self, active: u32, available: u32, offline: u32) {
        self.counters.active.store(active, Ordering::Relaxed);
        self.counters.available.store(available, Ordering::Relaxed);
        self.counters.offline.store(offline, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lease_recording_accumulates() {
        let counters = Arc::new(PoolCounters::default());
        let handle = PoolHandle::new(Arc::clone(&counters));

        handle.record_lease(Duration::from_millis(250));
        handle.record_lease(Duration::from_millis(750));
        handle.record_refused();

        assert_eq!(counters.served(), 2);
        assert_eq!(counters.refused(), 1);
        assert_eq!(counters.active_time_millis(), 1000);
    }

    #[test]
    fn gauges_are_set_wholesale() {
        let counters = Arc::new(PoolCounters::default());
        let handle = PoolHandle::new(Arc::clone(&counters));

        handle.set_connection_counts(3, 2, 1);
        assert_eq!(counters.active(), 3);
        assert_eq!(counters.available(), 2);
        assert_eq!(counters.offline(), 1);

        handle.set_connection_counts(0, 5, 0);
        assert_eq!(counters.active(), 0);
        assert_eq!(counters.available(), 5);
    }
}
