use clap::Parser;
use reckon_core::config::{self, CoreConfig};
use reckon_http::{init_tracing, server::ServerConfig};
use std::path::PathBuf;

/// Reckon HTTP API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "RECKON_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "RECKON_PORT", default_value_t = 3000)]
    port: u16,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Core configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let core: CoreConfig = match &cli.config {
        Some(file) => {
            tracing::info!("Loading configuration from file: {}", file.display());
            config::from_file(file)?
        }
        None => CoreConfig::default(),
    };

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        core,
    };

    reckon_http::start_with_config(config).await
}
