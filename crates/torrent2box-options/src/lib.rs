//! Options page of the extension.
//!
//! This crate holds the generic form lifecycle every settings form is built
//! on, the options form configured on top of it, and the options surface
//! which renders that form, listens to the message relay and talks to the
//! background context.

pub mod autofocus;
pub mod forms;
pub mod surface;
pub mod toast;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use torrent2box_bridge::MessageToBackground;
use torrent2box_bridge::options::OptionsDto;
use torrent2box_bridge::relay::MessageRelay;
use torrent2box_bridge::storage::SettingsStore;

use crate::surface::{OptionsSurface, SurfaceCommand};
use crate::toast::LogToaster;

/// Opens the options page on the terminal and serves it until the user quits
/// or stdin closes.
pub fn run<S>(
    store: S,
    relay: MessageRelay,
    background: Sender<MessageToBackground>,
) -> anyhow::Result<()>
where
    S: SettingsStore<OptionsDto>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut surface = OptionsSurface::open(store, LogToaster, &relay, background).await;
        // the relay handle is only needed to subscribe
        drop(relay);
        print!("{}", surface.render());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match line.parse::<SurfaceCommand>() {
                        Ok(SurfaceCommand::Quit) => break,
                        Ok(command) => {
                            surface.handle_command(command).await;
                        }
                        Err(error) => println!("{error}"),
                    }
                    print!("{}", surface.render());
                }
                message = surface.next_relayed() => {
                    let Some(message) = message else {
                        break;
                    };
                    surface.receive(message);
                    print!("{}", surface.render());
                }
            }
        }

        log::info!("Options page closed");
        Ok::<_, anyhow::Error>(())
    })
}
