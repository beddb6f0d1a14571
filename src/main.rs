pub mod config;
pub mod logging;
pub mod error;
pub mod types;
pub mod dates;
pub mod normalize;
pub mod mock;
pub mod feed;
pub mod oauth;
pub mod server;

use anyhow::Result;
use clap::Parser;

/// LinkedIn company feed service: serves the organization's recent posts as
/// JSON, falling back to fixed example posts whenever the live API is
/// unavailable.
#[derive(Debug, Parser)]
#[command(name = "linkedin_feed", version)]
struct Cli {
    /// Path to the configuration file (without extension).
    #[arg(long)]
    config: Option<String>,

    /// Listen address override, e.g. 127.0.0.1:9002.
    #[arg(long)]
    listen: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load(cli.config.as_deref())?;
    logging::setup_logger(&config.logging.level);

    let listen_addr = cli
        .listen
        .unwrap_or_else(|| config.server.listen_addr.clone());
    server::run(config, &listen_addr).await
}
