use crate::utils::error::{PoolscopeError, Result};
use serde::{Deserialize, Serialize};

/// API health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Monitor endpoint actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Stats,
    Chart,
}

impl Action {
    /// Resolve the `action` parameter, defaulting to `stats`.
    pub fn from_param(param: Option<&str>) -> Result<Self> {
        match param {
            None => Ok(Self::Stats),
            Some("list") => Ok(Self::List),
            Some("stats") => Ok(Self::Stats),
            Some("chart") => Ok(Self::Chart),
            Some(other) => Err(PoolscopeError::UnrecognisedAction(other.to_string())),
        }
    }
}

/// Decoded monitor query string.
///
/// axum's `Query` extractor cannot express the repeated `c`/`l` keys chart
/// links carry, so the raw query string is decoded here with form-urlencoded
/// semantics. Unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MonitorQuery {
    pub action: Option<String>,
    pub alias: Option<String>,
    pub colors: Vec<String>,
    pub lengths: Vec<String>,
    pub divisions: Option<String>,
}

impl MonitorQuery {
    pub fn decode(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "action" => query.action = Some(value.into_owned()),
                "alias" => query.alias = Some(value.into_owned()),
                "c" => query.colors.push(value.into_owned()),
                "l" => query.lengths.push(value.into_owned()),
                "d" => query.divisions = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }
}

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_address: String,
    pub bind_port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 9090,
        }
    }
}
