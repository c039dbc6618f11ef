//! Shutdown coordination.
//!
//! The coordinator holds a latched flag rather than a one-shot message: a
//! Ctrl+C that lands while the listener is still binding is not lost, the
//! server stops as soon as it starts waiting.

use std::future::Future;

use tokio::sync::watch;

/// Latched graceful-shutdown flag.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Future that completes once [`trigger`](Self::trigger) has been called,
    /// before or after this point.
    ///
    /// Dropping the coordinator without triggering leaves the future pending,
    /// so a failed signal handler does not stop the server.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            if rx.wait_for(|stopped| *stopped).await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
