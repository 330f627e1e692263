// Graceful-stop signaling between the daemon and the worker.

use tokio::sync::watch;

/// Receiving half of the stop signal, cloned into each task that
/// needs to observe it.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// True once shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the shutdown signal. Returns immediately if it was
    /// already sent, so a pre-armed token never blocks.
    pub async fn wait(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        let _ = self.rx.changed().await;
    }
}

/// Sending half, held by the daemon.
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Request shutdown. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_token_starts_unsignaled() {
        let (_tx, rx) = shutdown_channel();
        assert!(!rx.is_shutdown());
    }

    #[tokio::test]
    async fn test_shutdown_is_observed() {
        let (tx, rx) = shutdown_channel();
        tx.shutdown();
        assert!(rx.is_shutdown());
    }

    #[tokio::test]
    async fn test_wait_returns_after_signal() {
        let (tx, mut rx) = shutdown_channel();

        let waiter = tokio::spawn(async move {
            rx.wait().await;
        });

        tx.shutdown();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait did not observe shutdown")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_on_already_signaled_token_is_immediate() {
        let (tx, mut rx) = shutdown_channel();
        tx.shutdown();

        tokio::time::timeout(Duration::from_millis(100), rx.wait())
            .await
            .expect("pre-armed wait should not block");
    }
}
