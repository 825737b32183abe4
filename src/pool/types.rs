use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static description of one registered pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolDefinition {
    /// Stable identifier naming this pool.
    pub alias: String,
    /// Connection URL the pool hands out connections for.
    pub url: String,
    /// Driver used to open connections.
    pub driver: String,
    pub minimum_connection_count: u32,
    pub maximum_connection_count: u32,
    /// Spare connections kept ready beyond current demand.
    pub prototype_count: u32,
    /// Maximum age of a connection before it is retired.
    pub maximum_connection_lifetime: Duration,
    /// Maximum time a single lease may stay active.
    pub maximum_active_time: Duration,
    /// Interval between housekeeping sweeps.
    pub house_keeping_sleep_time: Duration,
    /// Statement run against idle connections during housekeeping.
    pub house_keeping_test_statement: Option<String>,
    /// Exception class names that mark a connection as unusable.
    pub fatal_exceptions: Vec<String>,
    /// Statistics window description, e.g. "30s" or "1m". Absent = disabled.
    pub statistics: Option<String>,
}

/// Point-in-time counts for one pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub snapshot_date: DateTime<Utc>,
    pub date_started: DateTime<Utc>,
    pub active_connection_count: u32,
    pub available_connection_count: u32,
    pub offline_connection_count: u32,
    pub maximum_connection_count: u32,
    pub served_count: u64,
    pub refused_count: u64,
}

/// Accumulated activity over one closed window [start, stop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolStatistics {
    pub start_date: DateTime<Utc>,
    pub stop_date: DateTime<Utc>,
    pub served_count: u64,
    pub refused_count: u64,
    pub served_per_second: f64,
    pub refused_per_second: f64,
    pub average_active_time: Duration,
    pub average_active_count: f64,
}
