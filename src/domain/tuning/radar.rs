/// Gameplay tuning for synthetic radar sweeps.
///
/// These are behaviour-defining constants; change them together with client HUD tuning.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarTuning {
    /// Shortest detection radius any loadout may have, in meters.
    pub min_range_m: f64,

    /// Longest detection radius any loadout may have, in meters.
    pub max_range_m: f64,

    /// Sphere-tracing step budget for a single line-of-sight test.
    pub occlusion_max_steps: usize,

    /// Surface tolerance for line-of-sight tests, in meters. A hit within this
    /// distance of the target does not count as occlusion.
    pub occlusion_epsilon_m: f64,

    /// Confidence a last-known contact never decays below.
    pub min_confidence: f64,
}

impl Default for RadarTuning {
    fn default() -> Self {
        Self {
            min_range_m: 600.0,
            max_range_m: 900.0,
            occlusion_max_steps: 64,
            occlusion_epsilon_m: 0.25,
            min_confidence: 0.1,
        }
    }
}

impl RadarTuning {
    /// Clamps a configured range into the supported envelope; non-positive ranges
    /// fall back to the minimum.
    pub fn clamp_range(&self, range_m: f64) -> f64 {
        if range_m.is_nan() || range_m <= 0.0 {
            return self.min_range_m;
        }
        range_m.clamp(self.min_range_m, self.max_range_m)
    }
}
