//! Fan-out of background events to the user.
//!
//! Every event goes two independent ways: its body is relayed to all open UI
//! surfaces, and a notification is requested from the platform. Once the
//! platform confirms, the notification is taken down again after a fixed
//! delay counted from the confirmation.
//!
//! Pending dismissals are tracked so that [`NotificationGateway::drain`] can
//! let them finish before the runtime goes away.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;

use torrent2box_bridge::notification::{IconVariant, NotificationEvent};
use torrent2box_bridge::relay::MessageRelay;

use crate::platform::{NotificationKind, NotificationOptions, NotificationPlatform};

/// Title shown on every notification.
pub const NOTIFICATION_TITLE: &str = "[torrent2box]";

/// How long a confirmed notification stays on screen.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_millis(5000);

/// Presentation settings of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub title: String,
    pub auto_dismiss: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            auto_dismiss: AUTO_DISMISS_DELAY,
        }
    }
}

pub struct NotificationGateway<P> {
    relay: MessageRelay,
    platform: Arc<P>,
    config: GatewayConfig,
    dismissals: Mutex<JoinSet<()>>,
}

impl<P: NotificationPlatform> NotificationGateway<P> {
    pub fn new(relay: MessageRelay, platform: P) -> Self {
        Self::with_config(relay, platform, GatewayConfig::default())
    }

    pub fn with_config(relay: MessageRelay, platform: P, config: GatewayConfig) -> Self {
        Self {
            relay,
            platform: Arc::new(platform),
            config,
            dismissals: Mutex::new(JoinSet::new()),
        }
    }

    /// Relays `body` to open surfaces and shows it as a platform
    /// notification.
    ///
    /// Returns immediately. The platform request and the later dismissal run
    /// on a spawned task, so this must be called from within a Tokio runtime.
    pub fn notify(&self, variant: IconVariant, body: impl Into<String>) {
        let body = body.into();
        self.relay.broadcast(body.clone());

        let options = NotificationOptions {
            title: self.config.title.clone(),
            icon: variant,
            kind: NotificationKind::Basic,
            message: body,
        };
        let platform = Arc::clone(&self.platform);
        let delay = self.config.auto_dismiss;

        let mut dismissals = self
            .dismissals
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while dismissals.try_join_next().is_some() {}

        dismissals.spawn(async move {
            let Some(handle) = platform.create(options).await else {
                log::debug!("Notification was not confirmed, nothing to dismiss");
                return;
            };

            log::trace!("Notification {} confirmed, dismissing in {delay:?}", handle.id());
            tokio::time::sleep(delay).await;
            platform.clear(handle).await;
        });
    }

    /// Waits until every notification requested so far is either dismissed
    /// or known to be unconfirmed.
    pub async fn drain(&self) {
        let mut pending = std::mem::take(
            &mut *self
                .dismissals
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        if !pending.is_empty() {
            log::debug!("Waiting for {} pending notification(s)", pending.len());
        }
        while let Some(finished) = pending.join_next().await {
            if let Err(error) = finished {
                log::warn!("Notification task failed: {error}");
            }
        }
    }

    pub fn notify_event(&self, event: NotificationEvent) {
        self.notify(event.kind, event.body);
    }
}
