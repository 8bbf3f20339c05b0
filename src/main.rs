use torrent2box_bridge::options::OPTIONS_FILE_NAME;
use torrent2box_bridge::relay::MessageRelay;
use torrent2box_bridge::storage::TomlFileStore;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let relay = MessageRelay::default();
    let channel = torrent2box_bridge::BackgroundChannel::default();

    let options_store = TomlFileStore::in_config_dir(OPTIONS_FILE_NAME)?;
    log::info!("Options are stored at {:?}", options_store.path());

    let background =
        torrent2box_background::run(channel.background_rx, relay.clone(), options_store)?;
    torrent2box_options::run(
        TomlFileStore::in_config_dir(OPTIONS_FILE_NAME)?,
        relay,
        channel.surface_tx,
    )?;

    if background.join().is_err() {
        anyhow::bail!("background context panicked");
    }
    Ok(())
}
