// Vehicle roster: the radar's view of the world's vehicles plus their loadouts.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::tuning::LoadoutCatalog;
use crate::domain::{VehicleSource, VehicleState};
use crate::use_cases::state::WorldState;

/// Adapts the authoritative vehicle store to [`VehicleSource`].
///
/// Loadout assignments are recorded by whoever admits a vehicle; vehicles without
/// one fall back to the catalogue's default loadout.
#[derive(Debug)]
pub struct VehicleRoster {
    world: Arc<WorldState>,
    catalogue: Arc<LoadoutCatalog>,
    loadouts: RwLock<HashMap<String, String>>,
}

impl VehicleRoster {
    pub fn new(world: Arc<WorldState>, catalogue: Arc<LoadoutCatalog>) -> Self {
        Self {
            world,
            catalogue,
            loadouts: RwLock::new(HashMap::new()),
        }
    }

    pub fn assign_loadout(&self, vehicle_id: &str, loadout_id: &str) {
        if vehicle_id.is_empty() || loadout_id.is_empty() {
            return;
        }
        self.loadouts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(vehicle_id.to_string(), loadout_id.to_string());
    }

    pub fn clear_loadout(&self, vehicle_id: &str) {
        self.loadouts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(vehicle_id);
    }
}

impl VehicleSource for VehicleRoster {
    fn snapshot(&self) -> Vec<VehicleState> {
        self.world.vehicles.snapshot()
    }

    fn loadout_for(&self, vehicle_id: &str) -> String {
        let assigned = self
            .loadouts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(vehicle_id)
            .cloned();
        assigned
            .or_else(|| self.catalogue.default_loadout_id().map(str::to_string))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec3;

    fn roster() -> VehicleRoster {
        VehicleRoster::new(
            Arc::new(WorldState::new()),
            Arc::new(LoadoutCatalog::embedded().clone()),
        )
    }

    #[test]
    fn when_loadout_is_assigned_then_it_is_reported() {
        let roster = roster();

        roster.assign_loadout("veh-1", "skiff-raider");

        assert_eq!(roster.loadout_for("veh-1"), "skiff-raider");
    }

    #[test]
    fn when_loadout_is_missing_then_default_is_reported() {
        let roster = roster();
        roster.assign_loadout("veh-1", "skiff-raider");
        roster.clear_loadout("veh-1");

        assert_eq!(roster.loadout_for("veh-1"), "skiff-strike");
    }

    #[test]
    fn when_catalogue_is_empty_then_loadout_is_blank() {
        let roster = VehicleRoster::new(
            Arc::new(WorldState::new()),
            Arc::new(LoadoutCatalog::default()),
        );

        assert_eq!(roster.loadout_for("veh-1"), "");
    }

    #[test]
    fn when_world_holds_vehicles_then_snapshot_mirrors_the_store() {
        let world = Arc::new(WorldState::new());
        world.vehicles.upsert(VehicleState::new("veh-1", Vec3::ZERO));
        world.vehicles.upsert(VehicleState::new("veh-2", Vec3::ZERO));
        let roster = VehicleRoster::new(world, Arc::new(LoadoutCatalog::default()));

        assert_eq!(roster.snapshot().len(), 2);
    }
}
