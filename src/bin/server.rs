//! meteowire Server Binary
//!
//! Starts the TCP weather server on loopback.

use std::sync::Arc;

use clap::Parser;
use meteowire::network::{NetworkSession, Server};
use meteowire::protocol::DEFAULT_PORT;
use meteowire::{CityRegistry, RandomProvider, Result, ServerConfig, WeatherProvider};
use tracing_subscriber::{fmt, EnvFilter};

/// meteowire Server
#[derive(Parser, Debug)]
#[command(name = "meteowire-server")]
#[command(about = "Answers weather queries for a fixed set of cities")]
#[command(version)]
struct Args {
    /// Port to listen on (0 uses the default)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Connection workers (1 serves clients strictly one at a time)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,meteowire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    });

    if let Err(e) = run(args) {
        tracing::error!("Server error: {}", e);
        std::process::exit(e.exit_code());
    }

    tracing::info!("Server terminated");
}

fn run(args: Args) -> Result<()> {
    let _session = NetworkSession::acquire()?;

    tracing::info!("meteowire server v{}", meteowire::VERSION);

    let port = if args.port == 0 { DEFAULT_PORT } else { args.port };
    let config = ServerConfig::builder()
        .port(port)
        .workers(args.workers)
        .build();

    let registry = Arc::new(CityRegistry::default());
    let provider: Arc<dyn WeatherProvider> = Arc::new(RandomProvider::new());

    let server = Server::bind(config, registry, provider)?;
    server.run()
}
