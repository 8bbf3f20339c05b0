//! Shared plumbing between the background context and the UI surfaces.
//!
//! This crate defines the data passed between the two sides of the
//! extension and the channels carrying it:
//! - UI surfaces send commands to the background context over a bounded
//!   [`tokio::sync::mpsc`] channel ([`BackgroundChannel`]).
//! - The background context pushes user-facing messages to every open
//!   surface through the [`relay::MessageRelay`].
//!
//! Settings live behind the [`storage::SettingsStore`] interface so that
//! both sides can read them without knowing where they are kept.

pub mod notification;
pub mod options;
pub mod relay;
pub mod storage;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Commands a UI surface can issue to the background context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageToBackground {
    /// Show a notification and relay its body to every open surface.
    Notify(notification::NotificationEvent),
    /// The options were saved by a surface; the background context should
    /// pick them up.
    OptionsSaved,
}

/// Bounded `tokio::mpsc` channel from UI surfaces to the background context.
pub struct BackgroundChannel {
    /// Sender handed to UI surfaces.
    pub surface_tx: Sender<MessageToBackground>,
    /// Receiver consumed by the background context.
    pub background_rx: Receiver<MessageToBackground>,
}

impl BackgroundChannel {
    /// Creates a new channel with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (surface_tx, background_rx) = mpsc::channel(buffer);
        Self {
            surface_tx,
            background_rx,
        }
    }
}

impl Default for BackgroundChannel {
    fn default() -> Self {
        Self::new(64)
    }
}
