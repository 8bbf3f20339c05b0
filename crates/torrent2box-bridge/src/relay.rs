//! One-directional broadcast from the background context to open UI surfaces.
//!
//! The relay is a thin wrapper over [`tokio::sync::broadcast`]. Delivery is
//! best-effort: nothing is buffered for surfaces that are not subscribed yet,
//! and broadcasting with no subscriber at all is a no-op.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// Default number of messages a slow surface may fall behind before it starts
/// skipping.
pub const DEFAULT_RELAY_CAPACITY: usize = 64;

/// Sending side of the cross-surface broadcast. Cheap to clone; every clone
/// feeds the same set of subscriptions.
#[derive(Debug, Clone)]
pub struct MessageRelay {
    sender: broadcast::Sender<String>,
}

impl MessageRelay {
    /// Creates a relay whose subscriptions buffer at most `capacity` messages.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "relay capacity must be greater than 0");
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Sends `body` to every currently subscribed surface.
    pub fn broadcast(&self, body: impl Into<String>) {
        let body = body.into();
        match self.sender.send(body) {
            Ok(receivers) => log::debug!("Relayed message to {receivers} surface(s)"),
            Err(_) => log::trace!("No open surfaces, dropping relayed message"),
        }
    }

    /// Registers a new surface. It only sees messages broadcast from now on.
    pub fn subscribe(&self) -> SurfaceSubscription {
        SurfaceSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of surfaces currently subscribed.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MessageRelay {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_CAPACITY)
    }
}

/// Receiving side held by one UI surface. Dropping it unsubscribes the
/// surface.
#[derive(Debug)]
pub struct SurfaceSubscription {
    receiver: broadcast::Receiver<String>,
}

impl SurfaceSubscription {
    /// Waits for the next relayed message. Returns `None` once every
    /// [`MessageRelay`] handle is gone.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Surface fell behind, skipped {skipped} relayed message(s)");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next message if one is already waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Surface fell behind, skipped {skipped} relayed message(s)");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
