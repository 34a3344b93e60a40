// Synthetic radar messages produced by the scanner and fanned out by the processor.

use super::math::Vec3;

/// Interest bucket a client should place a contact in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InterestTier {
    #[default]
    Unspecified,
    SelfTier,
    Nearby,
    Radar,
    Extended,
    Passive,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarContactEntry {
    pub target_entity_id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    /// 1.0 for live contacts; decays towards 0.1 for last-known ones.
    pub confidence: f64,
    pub occluded: bool,
    pub suggested_tier: InterestTier,
}

/// Every entry observed by a single source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarContact {
    pub schema_version: String,
    pub source_entity_id: String,
    pub entries: Vec<RadarContactEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarFrame {
    pub schema_version: String,
    pub frame_id: u64,
    /// Fallback source for contacts that do not name one.
    pub emitter_entity_id: String,
    pub captured_at_ms: i64,
    pub contacts: Vec<RadarContact>,
}
