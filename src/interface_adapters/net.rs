use crate::domain::RadarContact;
use crate::interface_adapters::protocol::{RadarContactDto, ServerMessage, WorldDiffDto};
use crate::use_cases::TickUpdate;

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, warn};

/// Serializes each tick update once and broadcasts the shared text.
///
/// The most recent diff is also kept in `latest_tx` so a lagging subscriber can
/// resynchronize without waiting for the next tick.
pub async fn diff_serializer(
    mut updates_rx: broadcast::Receiver<TickUpdate>,
    outbound_tx: broadcast::Sender<Arc<str>>,
    latest_tx: watch::Sender<Arc<str>>,
) {
    loop {
        match updates_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::WorldDiff(WorldDiffDto::from(&update));
                let Some(text) = encode(&msg) else {
                    continue;
                };
                latest_tx.send_replace(Arc::clone(&text));
                // Nobody listening is not an error.
                let _ = outbound_tx.send(text);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "diff serializer lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("tick updates channel closed; diff serializer exiting");
                break;
            }
        }
    }
}

/// Serializes radar contact bundles onto the same outbound stream as world diffs.
pub async fn radar_forwarder(
    mut contacts_rx: mpsc::Receiver<RadarContact>,
    outbound_tx: broadcast::Sender<Arc<str>>,
) {
    while let Some(contact) = contacts_rx.recv().await {
        let msg = ServerMessage::RadarContact(RadarContactDto::from(&contact));
        if let Some(text) = encode(&msg) {
            let _ = outbound_tx.send(text);
        }
    }
    debug!("radar contact channel closed; forwarder exiting");
}

fn encode(msg: &ServerMessage) -> Option<Arc<str>> {
    match serde_json::to_string(msg) {
        Ok(text) => Some(Arc::from(text)),
        Err(e) => {
            error!(error = ?e, "failed to serialize server message");
            None
        }
    }
}
