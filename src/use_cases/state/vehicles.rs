use super::store::{EntityDiff, EntityStore, Kinematic};
use crate::domain::VehicleState;

pub type VehicleStore = EntityStore<VehicleState>;
pub type VehicleDiff = EntityDiff<VehicleState>;

impl Kinematic for VehicleState {
    fn entity_id(&self) -> &str {
        &self.vehicle_id
    }

    fn integrate(&mut self, dt_seconds: f64) {
        // Orientation is owned by the intent handler; only translation advances here.
        self.position = self.position + self.velocity * dt_seconds;
    }
}
