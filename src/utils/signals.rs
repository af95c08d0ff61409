//! Signal handling for graceful shutdown

use std::sync::Arc;
use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{info, warn};

use crate::state::AppState;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to create signal handler: {}, falling back to Ctrl-C", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
            }
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

/// Wait for a shutdown signal, then stop every running countdown so no
/// element is left disabled
pub async fn shutdown_and_release(state: Arc<AppState>) {
    shutdown_signal().await;
    info!("Releasing countdowns before shutdown");
    state.countdowns.cancel_all().await;
}
