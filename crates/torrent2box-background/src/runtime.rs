//! Background runtime setup.
//!
//! This module wires the notification platform, the options store and the
//! relay into an [`AppContext`] and runs its dispatch loop on a dedicated
//! thread.

use std::thread;

use tokio::sync::mpsc::Receiver;
use torrent2box_bridge::MessageToBackground;
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::relay::MessageRelay;
use torrent2box_bridge::storage::TomlFileStore;

use crate::app::AppContext;
use crate::gateway::NotificationGateway;
use crate::platform::NotificationPlatform;

#[cfg(all(unix, not(target_os = "macos")))]
fn default_platform() -> impl NotificationPlatform {
    crate::platform::DesktopNotifications::default()
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn default_platform() -> impl NotificationPlatform {
    crate::platform::SilentPlatform
}

/// Spawn the background context and begin processing surface commands.
///
/// The returned thread finishes once every surface sender is dropped and the
/// notifications it showed have been taken down.
pub fn run(
    rx: Receiver<MessageToBackground>,
    relay: MessageRelay,
    options_store: TomlFileStore<OptionsDto>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("background".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                let gateway = NotificationGateway::new(relay, default_platform());
                let context = AppContext::new(gateway, options_store);
                context.consume_surface_messages(rx).await;
            });
        })
}
