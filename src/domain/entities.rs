// Domain-level simulation entities held by the authoritative stores.

use std::collections::BTreeMap;

use super::math::Vec3;

/// Euler orientation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleState {
    pub schema_version: String,
    pub vehicle_id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Orientation,
    pub angular_velocity: Vec3,
    pub flight_assist: bool,
    pub updated_at_ms: i64,
}

impl VehicleState {
    pub fn new(vehicle_id: impl Into<String>, position: Vec3) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            position,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectileState {
    pub schema_version: String,
    pub projectile_id: String,
    pub owner_id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub active: bool,
    pub updated_at_ms: i64,
}

impl ProjectileState {
    pub fn new(projectile_id: impl Into<String>, position: Vec3, velocity: Vec3) -> Self {
        Self {
            projectile_id: projectile_id.into(),
            position,
            velocity,
            active: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventKind {
    #[default]
    Unspecified,
    Spawned,
    Destroyed,
    Damaged,
    Respawned,
}

/// Gameplay event buffered until the next tick flushes it. Write-once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameEvent {
    pub schema_version: String,
    pub event_id: String,
    pub kind: EventKind,
    pub occurred_at_ms: i64,
    pub metadata: BTreeMap<String, String>,
    pub related_entity_ids: Vec<String>,
}

impl GameEvent {
    pub fn new(event_id: impl Into<String>, kind: EventKind) -> Self {
        Self {
            event_id: event_id.into(),
            kind,
            ..Default::default()
        }
    }
}
