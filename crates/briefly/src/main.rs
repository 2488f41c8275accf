//! Briefly server - title and bullet summaries over HTTP

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use briefly::config::Config;
use briefly::error::Result;
use briefly::server::SummaryServer;

/// Briefly - summarize text and chat transcripts into a title and bullets
#[derive(Parser)]
#[command(name = "briefly")]
#[command(about = "Summarize text and chat transcripts into a title and bullets")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server (default command)
    #[command(name = "serve")]
    Serve {
        /// Override the listen port
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {e}");
        }
    }

    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None => serve(cli.config, None).await,
        Some(Command::Serve { port }) => serve(cli.config, port).await,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,briefly=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    tracing::info!("Starting Briefly");

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::debug!(
        "Config loaded: listen={}, provider_configured={}, timeout={}s",
        config.server.listen_addr(),
        config.provider.is_configured(),
        config.provider.timeout_secs
    );

    SummaryServer::new(config).serve().await?;

    tracing::info!("Briefly stopped");
    Ok(())
}
