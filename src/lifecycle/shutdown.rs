//! Shutdown coordination.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Long-running tasks subscribe and stop when the signal fires or when the
/// coordinator is dropped.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the receiver sees a trigger or the sender is gone.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
