use std::time::Duration;

use tokio::sync::watch;

use crate::sessions::SessionStore;

/// Periodically delete expired sessions until shutdown is signaled.
pub async fn run(sessions: SessionStore, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    tracing::debug!("Session sweeper started (every {}s)", interval.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        if let Err(e) = sessions.prune_expired().await {
            tracing::error!("Session sweep failed: {e}");
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::debug!("Session sweeper stopped");
}
