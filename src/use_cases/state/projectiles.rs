use super::store::{EntityDiff, EntityStore, Kinematic};
use crate::domain::ProjectileState;

pub type ProjectileStore = EntityStore<ProjectileState>;
pub type ProjectileDiff = EntityDiff<ProjectileState>;

impl Kinematic for ProjectileState {
    fn entity_id(&self) -> &str {
        &self.projectile_id
    }

    fn integrate(&mut self, dt_seconds: f64) {
        self.position = self.position + self.velocity * dt_seconds;
    }
}
