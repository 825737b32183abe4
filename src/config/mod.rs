use crate::pool::types::PoolDefinition;
use crate::utils::error::{PoolscopeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String, // "json" or "pretty"
}

/// One pool to register at startup. Durations are whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub alias: String,
    pub url: String,
    pub driver: String,
    #[serde(default = "default_minimum_connections")]
    pub minimum_connections: u32,
    #[serde(default = "default_maximum_connections")]
    pub maximum_connections: u32,
    #[serde(default)]
    pub prototype_count: u32,
    #[serde(default = "default_connection_lifetime_secs")]
    pub maximum_connection_lifetime_secs: u64,
    #[serde(default = "default_maximum_active_time_secs")]
    pub maximum_active_time_secs: u64,
    #[serde(default = "default_house_keeping_sleep_time_secs")]
    pub house_keeping_sleep_time_secs: u64,
    #[serde(default)]
    pub house_keeping_test_statement: Option<String>,
    #[serde(default)]
    pub fatal_exceptions: Vec<String>,
    /// Statistics window, e.g. "30s" or "1m". Omit to disable statistics.
    #[serde(default)]
    pub statistics: Option<String>,
}

// Default values
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_minimum_connections() -> u32 {
    1
}

fn default_maximum_connections() -> u32 {
    15
}

fn default_connection_lifetime_secs() -> u64 {
    4 * 3600
}

fn default_maximum_active_time_secs() -> u64 {
    300
}

fn default_house_keeping_sleep_time_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            pools: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PoolscopeError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| PoolscopeError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        for pool in &self.pools {
            if pool.alias.trim().is_empty() {
                return Err(PoolscopeError::Config(
                    "Pool alias cannot be empty".to_string(),
                ));
            }
            if pool.maximum_connections == 0 {
                return Err(PoolscopeError::Config(format!(
                    "Pool '{}': maximum_connections must be at least 1",
                    pool.alias
                )));
            }
            if pool.minimum_connections > pool.maximum_connections {
                return Err(PoolscopeError::Config(format!(
                    "Pool '{}': minimum_connections {} exceeds maximum_connections {}",
                    pool.alias, pool.minimum_connections, pool.maximum_connections
                )));
            }
        }

        let mut aliases: Vec<&str> = self.pools.iter().map(|p| p.alias.as_str()).collect();
        aliases.sort_unstable();
        aliases.dedup();
        if aliases.len() != self.pools.len() {
            return Err(PoolscopeError::Config(
                "Pool aliases must be unique".to_string(),
            ));
        }

        Ok(())
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let example = r#"[server]
bind_address = "127.0.0.1"
bind_port = 9090

[logging]
level = "info"  # Options: "trace", "debug", "info", "warn", "error"
format = "pretty"  # Options: "pretty", "json"

[[pools]]
alias = "orders"
url = "postgres://db.internal/orders"
driver = "postgres"
minimum_connections = 2
maximum_connections = 15
prototype_count = 2
maximum_connection_lifetime_secs = 14400
maximum_active_time_secs = 300
house_keeping_sleep_time_secs = 30
house_keeping_test_statement = "SELECT 1"
fatal_exceptions = ["FatalError"]
statistics = "1m"

# [[pools]]
# alias = "billing"
# url = "postgres://db.internal/billing"
# driver = "postgres"
"#;

        std::fs::write(path.as_ref(), example).map_err(|e| {
            PoolscopeError::Config(format!("Failed to write example config: {}", e))
        })?;

        Ok(())
    }
}

impl PoolConfig {
    pub fn to_definition(&self) -> PoolDefinition {
        PoolDefinition {
            alias: self.alias.clone(),
            url: self.url.clone(),
            driver: self.driver.clone(),
            minimum_connection_count: self.minimum_connections,
            maximum_connection_count: self.maximum_connections,
            prototype_count: self.prototype_count,
            maximum_connection_lifetime: Duration::from_secs(
                self.maximum_connection_lifetime_secs,
            ),
            maximum_active_time: Duration::from_secs(self.maximum_active_time_secs),
            house_keeping_sleep_time: Duration::from_secs(self.house_keeping_sleep_time_secs),
            house_keeping_test_statement: self.house_keeping_test_statement.clone(),
            fatal_exceptions: self.fatal_exceptions.clone(),
            statistics: self.statistics.clone(),
        }
    }
}
