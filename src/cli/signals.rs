//! Signal handling: SIGINT/SIGTERM stop the controller

use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::application::events::{ControllerEvent, EventSender};

/// Post `Quit` to the controller on SIGINT or SIGTERM.
///
/// Handlers only enqueue an event; the controller shuts itself down.
pub fn install_quit_handlers(events: &EventSender) -> Result<(), std::io::Error> {
    for (kind, name) in [
        (SignalKind::interrupt(), "SIGINT"),
        (SignalKind::terminate(), "SIGTERM"),
    ] {
        let mut stream = signal(kind)?;
        let tx = events.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                info!(signal = name, "received shutdown signal");
                if tx.send(ControllerEvent::Quit).is_err() {
                    break;
                }
            }
        });
    }
    Ok(())
}
