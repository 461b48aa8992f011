use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::mpsc;

/// Blocks until Ctrl-C is pressed.
pub fn wait_for_interrupt() -> Result<()> {
    let (done_tx, done_rx) = mpsc::channel::<()>();

    ctrlc::set_handler(move || {
        warn!("Ctrl-C received, shutting down..!");
        let _ = done_tx.send(());
    })
    .context("Error setting Ctrl-C handler..!")?;

    info!("Staying alive, press Ctrl-C to exit..!");
    done_rx
        .recv()
        .context("Ctrl-C handler went away..!")?;

    Ok(())
}
