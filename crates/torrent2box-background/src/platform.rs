//! Operating system notification center, seen through a narrow interface.
//!
//! The gateway only needs two things from the platform: show a notification
//! and later take it down again. Showing may never be confirmed (missing
//! permissions, no notification daemon), which is modelled as `None`.

use std::future::Future;

use torrent2box_bridge::notification::IconVariant;

/// Presentation style of a platform notification. Only plain text
/// notifications are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Basic,
}

/// Everything the platform needs to display one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOptions {
    pub title: String,
    pub icon: IconVariant,
    pub kind: NotificationKind,
    pub message: String,
}

/// Identifier the platform hands back once a notification is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle(u32);

impl NotificationHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// A notification center able to show and dismiss notifications.
pub trait NotificationPlatform: Send + Sync + 'static {
    /// Requests a notification. Resolves with a handle once the platform
    /// confirms it, or `None` if it never does.
    fn create(
        &self,
        options: NotificationOptions,
    ) -> impl Future<Output = Option<NotificationHandle>> + Send;

    /// Takes a previously created notification down.
    fn clear(&self, handle: NotificationHandle) -> impl Future<Output = ()> + Send;
}

/// A platform without a notification center. Never confirms anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlatform;

impl NotificationPlatform for SilentPlatform {
    async fn create(&self, options: NotificationOptions) -> Option<NotificationHandle> {
        log::debug!("No notification center, not showing {:?}", options.message);
        None
    }

    async fn clear(&self, _handle: NotificationHandle) {}
}

#[cfg(all(unix, not(target_os = "macos")))]
pub use desktop::DesktopNotifications;

#[cfg(all(unix, not(target_os = "macos")))]
mod desktop {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::{NotificationHandle, NotificationOptions, NotificationPlatform};

    /// Freedesktop notification center, reached over D-Bus with `notify-rust`.
    #[derive(Default)]
    pub struct DesktopNotifications {
        shown: Arc<Mutex<HashMap<u32, notify_rust::NotificationHandle>>>,
    }

    impl NotificationPlatform for DesktopNotifications {
        async fn create(&self, options: NotificationOptions) -> Option<NotificationHandle> {
            // D-Bus calls block, keep them off the event loop
            let shown = tokio::task::spawn_blocking(move || {
                notify_rust::Notification::new()
                    .summary(&options.title)
                    .body(&options.message)
                    .icon(options.icon.icon_name())
                    .show()
            })
            .await;

            let handle = match shown {
                Ok(Ok(handle)) => handle,
                Ok(Err(error)) => {
                    log::warn!("Notification center declined the notification: {error}");
                    return None;
                }
                Err(error) => {
                    log::warn!("Notification task failed: {error}");
                    return None;
                }
            };

            let id = handle.id();
            match self.shown.lock() {
                Ok(mut shown) => {
                    shown.insert(id, handle);
                }
                Err(_) => {
                    log::error!("Notification registry lock poisoned, {id} stays on screen");
                    return None;
                }
            }
            Some(NotificationHandle::new(id))
        }

        async fn clear(&self, handle: NotificationHandle) {
            let shown = match self.shown.lock() {
                Ok(mut shown) => shown.remove(&handle.id()),
                Err(_) => None,
            };

            match shown {
                Some(shown) => {
                    if let Err(error) = tokio::task::spawn_blocking(move || shown.close()).await {
                        log::warn!("Failed to close notification {}: {error}", handle.id());
                    }
                }
                None => log::debug!("Notification {} is already gone", handle.id()),
            }
        }
    }
}
