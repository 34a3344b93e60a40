// Authoritative entity stores and the world aggregator that ticks them.

pub mod events;
pub mod projectiles;
pub mod store;
pub mod vehicles;
pub mod world;

pub use events::{EventDiff, EventStore};
pub use projectiles::{ProjectileDiff, ProjectileStore};
pub use store::{EntityDiff, EntityStore, Kinematic};
pub use vehicles::{VehicleDiff, VehicleStore};
pub use world::{TickDiff, WorldState};
