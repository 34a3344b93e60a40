// Vehicle loadout catalogue. Only the sensor-relevant fields are modelled here.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::error;

use super::radar::RadarTuning;
use crate::domain::errors::LoadoutError;

const EMBEDDED_CATALOGUE: &str = include_str!("loadouts.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleLoadout {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub selectable: bool,
    #[serde(default)]
    pub radar_range_meters: f64,
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    loadouts: Vec<VehicleLoadout>,
}

/// Immutable set of loadouts plus the radar envelope their ranges are clamped to.
#[derive(Debug, Clone, Default)]
pub struct LoadoutCatalog {
    loadouts: Vec<VehicleLoadout>,
    radar: RadarTuning,
}

impl LoadoutCatalog {
    pub fn new(loadouts: Vec<VehicleLoadout>) -> Result<Self, LoadoutError> {
        let mut seen = HashSet::new();
        for loadout in &loadouts {
            if !seen.insert(loadout.id.as_str()) {
                return Err(LoadoutError::DuplicateId(loadout.id.clone()));
            }
        }
        Ok(Self {
            loadouts,
            radar: RadarTuning::default(),
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, LoadoutError> {
        let file: CatalogueFile = serde_json::from_str(raw)?;
        Self::new(file.loadouts)
    }

    /// The catalogue compiled into the binary, parsed once.
    pub fn embedded() -> &'static LoadoutCatalog {
        static CATALOGUE: OnceLock<LoadoutCatalog> = OnceLock::new();
        CATALOGUE.get_or_init(|| {
            LoadoutCatalog::from_json(EMBEDDED_CATALOGUE).unwrap_or_else(|err| {
                // Every lookup then resolves to the minimum radar range.
                error!(error = %err, "embedded loadout catalogue rejected");
                LoadoutCatalog::default()
            })
        })
    }

    pub fn get(&self, loadout_id: &str) -> Option<&VehicleLoadout> {
        self.loadouts.iter().find(|loadout| loadout.id == loadout_id)
    }

    pub fn loadouts(&self) -> &[VehicleLoadout] {
        &self.loadouts
    }

    pub fn radar_tuning(&self) -> &RadarTuning {
        &self.radar
    }

    /// Detection radius for the loadout, clamped to the supported envelope.
    ///
    /// Unknown ids resolve to the minimum range.
    pub fn radar_range(&self, loadout_id: &str) -> f64 {
        let configured = self
            .get(loadout_id)
            .map(|loadout| loadout.radar_range_meters)
            .unwrap_or(0.0);
        self.radar.clamp_range(configured)
    }

    /// First selectable loadout, used when a vehicle has no explicit assignment.
    pub fn default_loadout_id(&self) -> Option<&str> {
        self.loadouts
            .iter()
            .find(|loadout| loadout.selectable)
            .map(|loadout| loadout.id.as_str())
    }
}
