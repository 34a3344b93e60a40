use std::time::{Instant, SystemTime};

use super::entities::VehicleState;

// Port for the roster the radar scanner samples each sweep.
pub trait VehicleSource: Send + Sync {
    fn snapshot(&self) -> Vec<VehicleState>;
    fn loadout_for(&self, vehicle_id: &str) -> String;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    /// Wall-clock time, used for timestamps that leave the process.
    fn now(&self) -> SystemTime;
    /// Monotonic reading, used for measuring ages. Never steps backwards.
    fn monotonic(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn monotonic(&self) -> Instant {
        Instant::now()
    }
}
