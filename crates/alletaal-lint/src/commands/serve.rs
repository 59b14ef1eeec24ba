//! Serve command — MCP server on stdio.

use std::sync::Arc;

use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use alletaal_lint_core::config::Config;

use super::build_scorer;
use crate::server::LintServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // No subcommand-specific arguments; transport is always stdio
}

/// Start the MCP server on stdio.
///
/// The server starts even without a configured annotator; scoring requests
/// then fail individually with a configuration error.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let scorer = build_scorer(&config)?;
    let server = LintServer::new(Arc::new(scorer));

    info!("starting MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| anyhow::anyhow!("failed to start MCP server: {e}"))?;

    service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server task failed: {e}"))?;

    info!("MCP server stopped");
    Ok(())
}
