// Gameplay tuning tables. Runtime/server configuration lives in `frameworks::config`.

pub mod loadouts;
pub mod radar;

pub use loadouts::{LoadoutCatalog, VehicleLoadout};
pub use radar::RadarTuning;
