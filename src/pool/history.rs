use crate::pool::counters::PoolCounters;
use crate::pool::types::PoolStatistics;
use crate::utils::error::{PoolscopeError, Result};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Completed windows kept per pool before the oldest is dropped.
pub const STATISTICS_RETENTION: usize = 5;

/// Rolling statistics recorder for one pool.
///
/// The registry's sampler calls `sample` once a second with the pool's live
/// counters; the recorder accumulates active-gauge samples and, once the
/// window duration has elapsed, closes the window into a `PoolStatistics`
/// and starts the next one. Completed windows are retained oldest-to-newest
/// up to `STATISTICS_RETENTION`.
#[derive(Debug)]
pub struct StatsRecorder {
    window: Duration,
    state: Mutex<RecorderState>,
}

#[derive(Debug)]
struct RecorderState {
    started: DateTime<Utc>,
    served_base: u64,
    refused_base: u64,
    active_time_base_millis: u64,
    active_sum: u64,
    active_samples: u64,
    completed: VecDeque<PoolStatistics>,
}

impl StatsRecorder {
    pub fn new(window: Duration, started: DateTime<Utc>) -> Self {
        Self {
            window,
            state: Mutex::new(RecorderState {
                started,
                served_base: 0,
                refused_base: 0,
                active_time_base_millis: 0,
                active_sum: 0,
                active_samples: 0,
                completed: VecDeque::with_capacity(STATISTICS_RETENTION),
            }),
        }
    }

    /// Take one sample of the live counters, closing the window if its
    /// duration has elapsed.
    pub fn sample(&self, counters: &PoolCounters, now: DateTime<Utc>) {
        let mut state = self.state.lock().expect("stats recorder poisoned");

        state.active_sum += u64::from(counters.active());
        state.active_samples += 1;

        let elapsed = now.signed_duration_since(state.started);
        if elapsed.num_milliseconds() < self.window.as_millis() as i64 {
            return;
        }

        let elapsed_secs = (elapsed.num_milliseconds() as f64 / 1000.0).max(f64::EPSILON);
        let served = counters.served().saturating_sub(state.served_base);
        let refused = counters.refused().saturating_sub(state.refused_base);
        let active_time_millis = counters
            .active_time_millis()
            .saturating_sub(state.active_time_base_millis);

        let average_active_time = if served > 0 {
            Duration::from_millis(active_time_millis / served)
        } else {
            Duration::ZERO
        };
        let average_active_count = if state.active_samples > 0 {
            state.active_sum as f64 / state.active_samples as f64
        } else {
            0.0
        };

        let window = PoolStatistics {
            start_date: state.started,
            stop_date: now,
            served_count: served,
            refused_count: refused,
            served_per_second: served as f64 / elapsed_secs,
            refused_per_second: refused as f64 / elapsed_secs,
            average_active_time,
            average_active_count,
        };
        state.completed.push_back(window);
        while state.completed.len() > STATISTICS_RETENTION {
            state.completed.pop_front();
        }

        state.started = now;
        state.served_base = counters.served();
        state.refused_base = counters.refused();
        state.active_time_base_millis = counters.active_time_millis();
        state.active_sum = 0;
        state.active_samples = 0;
    }

    /// Completed windows, oldest first.
    pub fn windows(&self) -> Vec<PoolStatistics> {
        let state = self.state.lock().expect("stats recorder poisoned");
        state.completed.iter().cloned().collect()
    }
}

/// Parse a window description such as "30s", "5m" or "1h".
pub fn parse_window_spec(spec: &str) -> Result<Duration> {
    let spec = spec.trim();
    let (digits, unit) = spec.split_at(spec.len().saturating_sub(1));
    let count: u64 = digits.parse().map_err(|_| {
        PoolscopeError::Config(format!("Invalid statistics window '{}'", spec))
    })?;
    if count == 0 {
        return Err(PoolscopeError::Config(format!(
            "Statistics window '{}' must be positive",
            spec
        )));
    }
    match unit {
        "s" => Ok(Duration::from_secs(count)),
        "m" => Ok(Duration::from_secs(count * 60)),
        "h" => Ok(Duration::from_secs(count * 3600)),
        _ => Err(PoolscopeError::Config(format!(
            "Invalid statistics window '{}': expected <n>s, <n>m or <n>h",
            spec
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::counters::PoolHandle;
    use chrono::Duration as ChronoDuration;
    use std::sync::Arc;

    #[test]
    fn window_spec_parsing() {
        assert_eq!(parse_window_spec("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_window_spec("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_window_spec("1h").unwrap(), Duration::from_secs(3600));
        assert!(parse_window_spec("").is_err());
        assert!(parse_window_spec("10").is_err());
        assert!(parse_window_spec("0s").is_err());
        assert!(parse_window_spec("tens").is_err());
    }

    #[test]
    fn window_rolls_with_rates() {
        let counters = Arc::new(PoolCounters::default());
        let handle = PoolHandle::new(Arc::clone(&counters));
        let start = Utc::now();
        let recorder = StatsRecorder::new(Duration::from_secs(10), start);

        for _ in 0..10 {
            handle.record_lease(Duration::from_millis(500));
        }
        handle.record_refused();
        handle.set_connection_counts(4, 1, 0);

        // Samples inside the window accumulate without closing it.
        recorder.sample(&counters, start + ChronoDuration::seconds(5));
        assert!(recorder.windows().is_empty());

        recorder.sample(&counters, start + ChronoDuration::seconds(10));
        let windows = recorder.windows();
        assert_eq!(windows.len(), 1);

        let window = &windows[0];
        assert_eq!(window.served_count, 10);
        assert_eq!(window.refused_count, 1);
        assert!((window.served_per_second - 1.0).abs() < 1e-9);
        assert_eq!(window.average_active_time, Duration::from_millis(500));
        assert!((window.average_active_count - 4.0).abs() < 1e-9);
    }

    #[test]
    fn second_window_only_counts_new_activity() {
        let counters = Arc::new(PoolCounters::default());
        let handle = PoolHandle::new(Arc::clone(&counters));
        let start = Utc::now();
        let recorder = StatsRecorder::new(Duration::from_secs(10), start);

        handle.record_lease(Duration::from_millis(100));
        recorder.sample(&counters, start + ChronoDuration::seconds(10));

        handle.record_lease(Duration::from_millis(300));
        handle.record_lease(Duration::from_millis(300));
        recorder.sample(&counters, start + ChronoDuration::seconds(20));

        let windows = recorder.windows();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].served_count, 1);
        assert_eq!(windows[1].served_count, 2);
        assert_eq!(windows[1].average_active_time, Duration::from_millis(300));
    }

    #[test]
    fn retention_is_bounded() {
        let counters = PoolCounters::default();
        let start = Utc::now();
        let recorder = StatsRecorder::new(Duration::from_secs(1), start);

        for i in 1..=(STATISTICS_RETENTION as i64 + 3) {
            recorder.sample(&counters, start + ChronoDuration::seconds(i));
        }

        let windows = recorder.windows();
        assert_eq!(windows.len(), STATISTICS_RETENTION);
        // Oldest windows were evicted; the remainder stay ordered.
        for pair in windows.windows(2) {
            assert!(pair[0].start_date < pair[1].start_date);
        }
    }
}
