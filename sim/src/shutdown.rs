//! Graceful shutdown controller for a running simulation.
//!
//! Listens for SIGINT/SIGTERM and trips the session's [`CancelToken`], so a
//! long run stops at the next round boundary and still reports what it
//! finalized.

use ffg_consensus::CancelToken;
use tokio::signal;

/// Bridges OS signals to the session's cancellation token.
pub struct ShutdownController {
    token: CancelToken,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self {
            token: CancelToken::new(),
        }
    }

    /// A handle to the token the session should poll.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    tracing::warn!("failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, cancelling simulation"); }
            _ = terminate => { tracing::info!("received SIGTERM, cancelling simulation"); }
        }

        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
