//! satreg-web - registration command front-end for Satellite.

use anyhow::Result;
use clap::Parser;
use satreg_core::{ClientConfig, NetworkConfig, Orchestrator};
use satreg_web::start_server;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "satreg-web")]
#[command(version, about = "Web front-end for Satellite registration commands")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "SATREG_PORT", default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "SATREG_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long, env = "SATREG_DEBUG")]
    debug: bool,

    /// Accept invalid TLS certificates from the Satellite server
    #[arg(long, env = "SATREG_INSECURE")]
    insecure: bool,

    /// Timeout for each upstream request, in seconds
    #[arg(
        long,
        env = "SATREG_TIMEOUT_SECS",
        default_value_t = NetworkConfig::REQUEST_TIMEOUT.as_secs()
    )]
    timeout_secs: u64,

    /// Maximum capsule detail lookups in flight per submission
    #[arg(
        long,
        env = "SATREG_DETAIL_CONCURRENCY",
        default_value_t = NetworkConfig::DEFAULT_DETAIL_CONCURRENCY
    )]
    detail_concurrency: usize,

    /// Organization whose activation keys are listed
    #[arg(
        long,
        env = "SATREG_ORGANIZATION_ID",
        default_value_t = NetworkConfig::DEFAULT_ORGANIZATION_ID
    )]
    organization_id: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG takes precedence over --debug
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting satreg-web");

    let config = ClientConfig::default()
        .with_accept_invalid_certs(args.insecure)
        .with_request_timeout(Duration::from_secs(args.timeout_secs))
        .with_detail_concurrency(args.detail_concurrency)
        .with_organization_id(args.organization_id);
    let orchestrator = Orchestrator::new(config)?;

    let addr = start_server(orchestrator, &args.host, args.port).await?;
    info!("Open http://{}/ in a browser", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
