use anyhow::{Context, Result};
use tracing::info;

/// Resolves on the first Ctrl-C. The handler is only installed once this is first polled, so
/// Ctrl-C keeps killing the process until the timer actually runs.
pub async fn wait_for_interrupt() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Received interrupt, stopping the timer");
    Ok(())
}
