//! meteowire Client Binary
//!
//! Sends one weather query and prints the answer.

use clap::Parser;
use meteowire::network::{render_report, Client, NetworkSession, RequestSpec};
use meteowire::protocol::DEFAULT_PORT;
use meteowire::{ClientConfig, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// meteowire Client
#[derive(Parser, Debug)]
#[command(name = "meteowire-client")]
#[command(about = "Query a meteowire server for one weather reading")]
#[command(after_help = "type: 't' temperature, 'h' humidity, 'w' wind, 'p' pressure")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1")]
    server: String,

    /// Server port (0 uses the default)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Request as "type city", e.g. "t Bari"
    #[arg(short, long)]
    request: String,
}

fn main() {
    // Product output goes to stdout; keep logs quiet unless asked
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    });

    if let Err(e) = run(args) {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: Args) -> Result<()> {
    let spec = RequestSpec::parse(&args.request)?;

    let _session = NetworkSession::acquire()?;

    let port = if args.port == 0 { DEFAULT_PORT } else { args.port };
    let config = ClientConfig::builder()
        .server(&args.server)
        .port(port)
        .build();

    let request = spec.to_request();
    let response = Client::new(config).query(&request)?;

    println!("{}", render_report(&args.server, &response, request.city()));
    tracing::debug!("Client terminated");
    Ok(())
}
