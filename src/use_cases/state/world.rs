use std::time::Duration;

use super::events::{EventDiff, EventStore};
use super::projectiles::{ProjectileDiff, ProjectileStore};
use super::vehicles::{VehicleDiff, VehicleStore};

/// Every state delta produced by one simulation tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickDiff {
    pub vehicles: VehicleDiff,
    pub projectiles: ProjectileDiff,
    pub events: EventDiff,
}

impl TickDiff {
    /// Whether the diff is worth broadcasting.
    pub fn has_changes(&self) -> bool {
        !self.vehicles.is_empty() || !self.projectiles.is_empty() || !self.events.is_empty()
    }
}

/// Authoritative state containers for the simulation.
///
/// Each store locks independently; a tick reads them one after another, so the three
/// sub-diffs are individually consistent but not taken at one instant.
#[derive(Debug, Default)]
pub struct WorldState {
    pub vehicles: VehicleStore,
    pub projectiles: ProjectileStore,
    pub events: EventStore,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates motion for `step` and collects the resulting diff.
    pub fn advance_tick(&self, step: Duration) -> TickDiff {
        let step_seconds = step.as_secs_f64();
        self.vehicles.advance(step_seconds);
        self.projectiles.advance(step_seconds);

        TickDiff {
            vehicles: self.vehicles.consume_diff(),
            projectiles: self.projectiles.consume_diff(),
            events: self.events.consume_diff(),
        }
    }

    /// Full state for bootstrapping a new subscriber. Buffered events are included but
    /// stay queued for the next tick.
    pub fn snapshot(&self) -> TickDiff {
        TickDiff {
            vehicles: VehicleDiff {
                updated: self.vehicles.snapshot(),
                removed: Vec::new(),
            },
            projectiles: ProjectileDiff {
                updated: self.projectiles.snapshot(),
                removed: Vec::new(),
            },
            events: EventDiff {
                events: self.events.pending(),
            },
        }
    }
}
