use crate::use_cases::{TickMonitor, WorldState};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

pub struct AppState {
    // Authoritative simulation state, read by the HTTP handlers.
    pub world: Arc<WorldState>,
    // Step timings recorded by the simulation loop.
    pub tick_monitor: Arc<TickMonitor>,
    /// Serialized diffs and radar contacts, shared across all subscribers.
    ///
    /// Nothing in this crate subscribes: this is where a client transport (a
    /// WebSocket fan-out, for instance) attaches with `outbound_tx.subscribe()`.
    /// Messages sent before anyone subscribes are discarded.
    pub outbound_tx: broadcast::Sender<Arc<str>>,
    // Latest serialized world diff for resynchronization.
    pub latest_diff_tx: watch::Sender<Arc<str>>,
}
