// Domain layer: simulation entities, radar messages, geometry and tuning.

pub mod entities;
pub mod errors;
pub mod math;
pub mod ports;
pub mod radar;
pub mod sdf;
pub mod tuning;

pub use entities::{EventKind, GameEvent, Orientation, ProjectileState, VehicleState};
pub use math::Vec3;
pub use ports::{Clock, SystemClock, VehicleSource};
pub use radar::{InterestTier, RadarContact, RadarContactEntry, RadarFrame};
pub use sdf::{PlaneField, RaycastHit, SampleFn, SignedDistanceField, SphereField, UnionField};
