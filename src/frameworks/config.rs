use std::{env, time::Duration};

// Runtime/server constants (not simulation tuning).

pub fn http_port() -> u16 {
    env::var("SIM_HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn tick_rate_hz() -> f64 {
    env::var("SIM_TICK_HZ")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|hz| hz.is_finite() && *hz > 0.0)
        .unwrap_or(60.0)
}

pub fn radar_scan_interval() -> Duration {
    let hz = env::var("RADAR_SCAN_HZ")
        .ok()
        .and_then(|v| v.parse::<f64>().ok());
    scan_period(hz)
}

// Rates too small to express as a `Duration` fall back like invalid ones.
fn scan_period(hz: Option<f64>) -> Duration {
    hz.filter(|hz| hz.is_finite() && *hz > 0.0)
        .and_then(|hz| Duration::try_from_secs_f64(1.0 / hz).ok())
        .filter(|period| !period.is_zero())
        .unwrap_or(Duration::from_millis(250))
}

pub fn radar_last_known_ttl() -> Duration {
    let millis = env::var("RADAR_LAST_KNOWN_TTL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(6000);
    Duration::from_millis(millis)
}

// Height of a flat occluding ground plane; unset means radar sees through terrain.
pub fn radar_ground_level() -> Option<f64> {
    env::var("RADAR_GROUND_LEVEL_M")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|level| level.is_finite())
}

pub const TICK_BROADCAST_CAPACITY: usize = 128;
pub const OUTBOUND_BROADCAST_CAPACITY: usize = 256;
pub const RADAR_CHANNEL_CAPACITY: usize = 64;
