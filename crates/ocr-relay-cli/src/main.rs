//! OCR relay command-line interface.
//!
//! ```bash
//! ocr-relay serve -H 0.0.0.0 -p 8088 --static-dir ./static
//! ocr-relay serve -c ocr-relay.toml -v
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ocr_relay::RelayConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocr-relay", author, version, about = "Relay OCR results to a browser front end", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Host address to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file (.toml or .json); defaults to discovering ocr-relay.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file holding the history
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Hand-off file written by the recognizer
    #[arg(long)]
    handoff: Option<PathBuf>,

    /// Directory of front-end assets served at /
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl ServeArgs {
    fn into_config(self) -> Result<RelayConfig> {
        let mut config = match &self.config {
            Some(path) => RelayConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RelayConfig::discover()
                .context("Failed to discover ocr-relay.toml")?
                .unwrap_or_default(),
        };

        config.apply_env_overrides();

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(snapshot) = self.snapshot {
            config.snapshot_path = snapshot;
        }
        if let Some(handoff) = self.handoff {
            config.handoff_path = handoff;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = Some(static_dir);
        }

        config.validate().context("Invalid relay configuration")?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(verbose).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serve(args) => {
            let config = args.into_config()?;
            ocr_relay::api::serve(config).await.context("OCR relay server failed")?;
        }
    }

    Ok(())
}
