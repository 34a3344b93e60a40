// Use cases layer: the simulation state, its tick loop and the radar pipeline.

pub mod radar;
pub mod roster;
pub mod simulation;
pub mod state;

pub use radar::{FrameHandler, RadarProcessor, Scanner, ScannerOptions};
pub use roster::VehicleRoster;
pub use simulation::{
    FixedStepper, SimulationSettings, TickMetrics, TickMonitor, TickUpdate, simulation_task,
};
pub use state::{TickDiff, WorldState};
