//! Shutdown broadcast shared by the signal listener and the HTTP server.
//!
//! A termination signal calls [`Shutdown::trigger`]; the server's receiver then
//! stops accepting connections and lets in-flight user requests finish their
//! store call before `HttpServer::run` returns.

use tokio::sync::broadcast;

/// Fan-out of a single "stop serving" event.
///
/// Clones share one channel, so the signal listener can own a clone while
/// `main` subscribes the server.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver handed to [`HttpServer::run`](crate::http::HttpServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. A no-op when nothing is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Subscribers that have not yet dropped their receiver.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
