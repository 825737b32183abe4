use clap::Parser;
use poolscope::api::types::ApiConfig;
use poolscope::api::start_monitor_server;
use poolscope::config::Config;
use poolscope::pool::PoolRegistry;
use poolscope::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "poolscope")]
#[command(about = "Read-only HTTP monitoring endpoint for named resource pools", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Generate example configuration file
    #[arg(long, value_name = "FILE")]
    generate_config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle config generation
    if let Some(config_path) = args.generate_config {
        println!("Generating example configuration file: {:?}", config_path);
        Config::create_example(&config_path)?;
        println!("Example configuration file created successfully!");
        println!(
            "Edit the file and run: poolscope --config {:?}",
            config_path
        );
        return Ok(());
    }

    // Initialize logging
    init_logging(&args.log_level)?;

    info!("Poolscope v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = if let Some(config_path) = args.config {
        info!("Loading configuration from: {:?}", config_path);
        Config::from_file(config_path)?
    } else {
        info!("No configuration file specified, using defaults");
        Config::default()
    };

    // Apply CLI overrides
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.server.bind_port = port;
    }

    // Register the configured pools
    let registry = Arc::new(PoolRegistry::new());
    for pool in &config.pools {
        registry.register(pool.to_definition())?;
    }
    Arc::clone(&registry).start_sampler();
    info!("Monitoring {} pool(s)", config.pools.len());

    let api_config = ApiConfig {
        bind_address: config.server.bind_address.clone(),
        bind_port: config.server.bind_port,
    };

    // Handle Ctrl+C for graceful shutdown
    let shutdown = tokio::spawn(async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C, shutting down gracefully...");
    });

    tokio::select! {
        result = start_monitor_server(api_config, registry) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(e);
            }
        }
        _ = shutdown => {
            info!("Server shutdown complete");
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(level)
        .map_err(|e| poolscope::PoolscopeError::Config(format!("Invalid log level: {}", e)))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    Ok(())
}
