use torrent2box_bridge::notification::NotificationEvent;

use crate::app::AppContext;
use crate::platform::NotificationPlatform;

/// Handles a notification request (see
/// [`torrent2box_bridge::MessageToBackground::Notify`]).
pub fn handle_notify<P: NotificationPlatform, S>(
    context: &AppContext<P, S>,
    event: NotificationEvent,
) {
    if event.body.trim().is_empty() {
        log::warn!("Ignoring notification with an empty body");
        return;
    }
    context.gateway.notify_event(event);
}
