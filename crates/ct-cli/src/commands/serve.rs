//! Serve command
//!
//! Run the HTTP server over the configured store.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::AppContext;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Execute the serve command
pub fn execute(args: ServeArgs, ctx: AppContext) -> Result<()> {
    let mut config = ctx.config;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Serving threads from {}", config.storage.data_dir.display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(ct_server::start_server(ctx.store, config))
        .context("Server failed")
}
