use torrent2box_bridge::notification::IconVariant;
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::storage::SettingsStore;

use crate::app::AppContext;
use crate::platform::NotificationPlatform;

/// Handles the options-saved signal (see
/// [`torrent2box_bridge::MessageToBackground::OptionsSaved`]) by reloading the
/// stored options and confirming where items will be forwarded.
pub async fn handle_options_saved<P, S>(context: &AppContext<P, S>)
where
    P: NotificationPlatform,
    S: SettingsStore<OptionsDto>,
{
    match context.options_store.load().await {
        Ok(Some(options)) => {
            log::info!("Options reloaded, forwarding to {}", options.address());
            context.gateway.notify(
                IconVariant::Success,
                format!("Forwarding items to {}", options.address()),
            );
        }
        Ok(None) => log::warn!("Options were reported saved but none are stored"),
        Err(error) => {
            log::error!("Failed to reload options: {error}");
            context
                .gateway
                .notify(IconVariant::Error, format!("Could not read options: {error}"));
        }
    }
}
