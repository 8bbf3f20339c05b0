//! Background context and message dispatching.
//!
//! The context owns the notification gateway and the options store, and
//! routes commands received from UI surfaces to the service handlers.

use tokio::sync::mpsc::Receiver;
use torrent2box_bridge::MessageToBackground;
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::storage::SettingsStore;

use crate::gateway::NotificationGateway;
use crate::platform::NotificationPlatform;
use crate::services;

/// Shared context passed to the service handlers.
pub struct AppContext<P, S> {
    /// Fans events out to the notification center and open surfaces.
    pub gateway: NotificationGateway<P>,
    /// Where the options edited on the options page are persisted.
    pub options_store: S,
}

impl<P, S> AppContext<P, S>
where
    P: NotificationPlatform,
    S: SettingsStore<OptionsDto>,
{
    pub fn new(gateway: NotificationGateway<P>, options_store: S) -> Self {
        Self {
            gateway,
            options_store,
        }
    }

    /// Read and dispatch commands from UI surfaces until every sender is
    /// gone, then wait for shown notifications to be dismissed.
    pub async fn consume_surface_messages(&self, mut rx: Receiver<MessageToBackground>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a surface message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("All surfaces disconnected, background context stops");
        self.gateway.drain().await;
    }

    /// Dispatches one command down to its service handler.
    pub async fn dispatch_message(&self, message: MessageToBackground) {
        match message {
            MessageToBackground::Notify(event) => {
                services::notify_service::handle_notify(self, event);
            }
            MessageToBackground::OptionsSaved => {
                services::options_service::handle_options_saved(self).await;
            }
        }
    }
}
