// Wire protocol DTOs and conversions for outbound simulation messages.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    EventKind, GameEvent, InterestTier, Orientation, ProjectileState, RadarContact,
    RadarContactEntry, Vec3, VehicleState,
};
use crate::use_cases::state::EntityDiff;
use crate::use_cases::{TickDiff, TickMetrics, TickUpdate};

/// Messages pushed to downstream subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Per-tick delta of every entity kind.
    WorldDiff(WorldDiffDto),
    // One observer's radar picture for a sweep.
    RadarContact(RadarContactDto),
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Vec3Dto {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for Vec3Dto {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrientationDto {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

impl From<Orientation> for OrientationDto {
    fn from(o: Orientation) -> Self {
        Self {
            yaw_deg: o.yaw_deg,
            pitch_deg: o.pitch_deg,
            roll_deg: o.roll_deg,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleStateDto {
    pub schema_version: String,
    pub vehicle_id: String,
    pub position: Vec3Dto,
    pub velocity: Vec3Dto,
    pub orientation: OrientationDto,
    pub angular_velocity: Vec3Dto,
    pub flight_assist: bool,
    pub updated_at_ms: i64,
}

impl From<&VehicleState> for VehicleStateDto {
    fn from(vehicle: &VehicleState) -> Self {
        Self {
            schema_version: vehicle.schema_version.clone(),
            vehicle_id: vehicle.vehicle_id.clone(),
            position: vehicle.position.into(),
            velocity: vehicle.velocity.into(),
            orientation: vehicle.orientation.into(),
            angular_velocity: vehicle.angular_velocity.into(),
            flight_assist: vehicle.flight_assist,
            updated_at_ms: vehicle.updated_at_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    pub schema_version: String,
    pub projectile_id: String,
    pub owner_id: String,
    pub position: Vec3Dto,
    pub velocity: Vec3Dto,
    pub active: bool,
    pub updated_at_ms: i64,
}

impl From<&ProjectileState> for ProjectileStateDto {
    fn from(projectile: &ProjectileState) -> Self {
        Self {
            schema_version: projectile.schema_version.clone(),
            projectile_id: projectile.projectile_id.clone(),
            owner_id: projectile.owner_id.clone(),
            position: projectile.position.into(),
            velocity: projectile.velocity.into(),
            active: projectile.active,
            updated_at_ms: projectile.updated_at_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKindDto {
    Unspecified,
    Spawned,
    Destroyed,
    Damaged,
    Respawned,
}

impl From<EventKind> for EventKindDto {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Unspecified => EventKindDto::Unspecified,
            EventKind::Spawned => EventKindDto::Spawned,
            EventKind::Destroyed => EventKindDto::Destroyed,
            EventKind::Damaged => EventKindDto::Damaged,
            EventKind::Respawned => EventKindDto::Respawned,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameEventDto {
    pub schema_version: String,
    pub event_id: String,
    pub kind: EventKindDto,
    pub occurred_at_ms: i64,
    pub metadata: BTreeMap<String, String>,
    pub related_entity_ids: Vec<String>,
}

impl From<&GameEvent> for GameEventDto {
    fn from(event: &GameEvent) -> Self {
        Self {
            schema_version: event.schema_version.clone(),
            event_id: event.event_id.clone(),
            kind: event.kind.into(),
            occurred_at_ms: event.occurred_at_ms,
            metadata: event.metadata.clone(),
            related_entity_ids: event.related_entity_ids.clone(),
        }
    }
}

/// Updated entities plus ids removed since the previous tick.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDiffDto<T> {
    pub updated: Vec<T>,
    pub removed: Vec<String>,
}

impl<'a, S, T> From<&'a EntityDiff<S>> for EntityDiffDto<T>
where
    T: From<&'a S>,
{
    fn from(diff: &'a EntityDiff<S>) -> Self {
        Self {
            updated: diff.updated.iter().map(T::from).collect(),
            removed: diff.removed.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldDiffDto {
    pub tick: u64,
    pub vehicles: EntityDiffDto<VehicleStateDto>,
    pub projectiles: EntityDiffDto<ProjectileStateDto>,
    pub events: Vec<GameEventDto>,
}

impl From<&TickUpdate> for WorldDiffDto {
    fn from(update: &TickUpdate) -> Self {
        Self {
            tick: update.tick,
            vehicles: (&update.diff.vehicles).into(),
            projectiles: (&update.diff.projectiles).into(),
            events: update.diff.events.events.iter().map(GameEventDto::from).collect(),
        }
    }
}

/// Full world state for bootstrapping a subscriber.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshotDto {
    pub vehicles: Vec<VehicleStateDto>,
    pub projectiles: Vec<ProjectileStateDto>,
    pub pending_events: Vec<GameEventDto>,
}

impl From<&TickDiff> for WorldSnapshotDto {
    fn from(snapshot: &TickDiff) -> Self {
        Self {
            vehicles: snapshot
                .vehicles
                .updated
                .iter()
                .map(VehicleStateDto::from)
                .collect(),
            projectiles: snapshot
                .projectiles
                .updated
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            pending_events: snapshot.events.events.iter().map(GameEventDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestTierDto {
    Unspecified,
    #[serde(rename = "self")]
    SelfTier,
    Nearby,
    Radar,
    Extended,
    Passive,
}

impl From<InterestTier> for InterestTierDto {
    fn from(tier: InterestTier) -> Self {
        match tier {
            InterestTier::Unspecified => InterestTierDto::Unspecified,
            InterestTier::SelfTier => InterestTierDto::SelfTier,
            InterestTier::Nearby => InterestTierDto::Nearby,
            InterestTier::Radar => InterestTierDto::Radar,
            InterestTier::Extended => InterestTierDto::Extended,
            InterestTier::Passive => InterestTierDto::Passive,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarContactEntryDto {
    pub target_entity_id: String,
    pub position: Vec3Dto,
    pub velocity: Vec3Dto,
    pub confidence: f64,
    pub occluded: bool,
    pub suggested_tier: InterestTierDto,
}

impl From<&RadarContactEntry> for RadarContactEntryDto {
    fn from(entry: &RadarContactEntry) -> Self {
        Self {
            target_entity_id: entry.target_entity_id.clone(),
            position: entry.position.into(),
            velocity: entry.velocity.into(),
            confidence: entry.confidence,
            occluded: entry.occluded,
            suggested_tier: entry.suggested_tier.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarContactDto {
    pub schema_version: String,
    pub source_entity_id: String,
    pub entries: Vec<RadarContactEntryDto>,
}

impl From<&RadarContact> for RadarContactDto {
    fn from(contact: &RadarContact) -> Self {
        Self {
            schema_version: contact.schema_version.clone(),
            source_entity_id: contact.source_entity_id.clone(),
            entries: contact.entries.iter().map(RadarContactEntryDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickMetricsDto {
    pub samples: u64,
    pub average_ms: f64,
    pub max_ms: f64,
    pub last_ms: f64,
    pub average_fps: f64,
}

impl From<TickMetrics> for TickMetricsDto {
    fn from(metrics: TickMetrics) -> Self {
        Self {
            samples: metrics.samples,
            average_ms: metrics.average.as_secs_f64() * 1000.0,
            max_ms: metrics.max.as_secs_f64() * 1000.0,
            last_ms: metrics.last.as_secs_f64() * 1000.0,
            average_fps: metrics.average_fps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventKind;
    use serde_json::Value;

    #[test]
    fn when_world_diff_is_serialized_then_it_is_tagged() {
        let mut diff = TickDiff::default();
        diff.vehicles.updated.push(VehicleState::new("veh-1", Vec3::new(1.0, 2.0, 3.0)));
        diff.projectiles.removed.push("proj-1".to_string());
        diff.events.events.push(GameEvent::new("evt-1", EventKind::Destroyed));
        let update = TickUpdate { tick: 9, diff };

        let msg = ServerMessage::WorldDiff(WorldDiffDto::from(&update));
        let value: Value = serde_json::to_value(&msg).expect("serialize world diff");

        assert_eq!(value["type"], "WorldDiff");
        assert_eq!(value["data"]["tick"], 9);
        assert_eq!(value["data"]["vehicles"]["updated"][0]["vehicle_id"], "veh-1");
        assert_eq!(value["data"]["vehicles"]["updated"][0]["position"]["z"], 3.0);
        assert_eq!(value["data"]["projectiles"]["removed"][0], "proj-1");
        assert_eq!(value["data"]["events"][0]["kind"], "destroyed");
    }

    #[test]
    fn when_radar_contact_is_serialized_then_tiers_use_wire_names() {
        let contact = RadarContact {
            schema_version: "radar.v1".to_string(),
            source_entity_id: "veh-1".to_string(),
            entries: vec![RadarContactEntry {
                target_entity_id: "veh-2".to_string(),
                suggested_tier: InterestTier::SelfTier,
                ..RadarContactEntry::default()
            }],
        };

        let msg = ServerMessage::RadarContact(RadarContactDto::from(&contact));
        let value: Value = serde_json::to_value(&msg).expect("serialize radar contact");

        assert_eq!(value["type"], "RadarContact");
        assert_eq!(value["data"]["schema_version"], "radar.v1");
        assert_eq!(value["data"]["entries"][0]["suggested_tier"], "self");
    }
}
