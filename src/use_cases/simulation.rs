use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::state::{TickDiff, WorldState};

const DEFAULT_TICK_RATE_HZ: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub tick_rate_hz: f64,
}

impl SimulationSettings {
    /// Fixed step for the configured rate. Rates that are non-positive or yield no
    /// representable step run at 60 Hz.
    pub fn step(&self) -> Duration {
        Some(self.tick_rate_hz)
            .filter(|hz| hz.is_finite() && *hz > 0.0)
            .and_then(|hz| Duration::try_from_secs_f64(1.0 / hz).ok())
            .filter(|step| !step.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE_HZ))
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
        }
    }
}

/// Turns irregular wall-clock deltas into a whole number of fixed steps.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: Duration,
    accumulator: Duration,
}

impl FixedStepper {
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() {
            SimulationSettings::default().step()
        } else {
            step
        };
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `elapsed` and returns how many steps are now due. The remainder carries
    /// into the next call.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}

/// Aggregated tick timings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickMetrics {
    pub samples: u64,
    pub average: Duration,
    pub max: Duration,
    pub last: Duration,
}

impl TickMetrics {
    pub fn average_fps(&self) -> f64 {
        if self.average.is_zero() {
            return 0.0;
        }
        1.0 / self.average.as_secs_f64()
    }
}

#[derive(Debug, Default)]
struct TickStats {
    samples: u64,
    total: Duration,
    max: Duration,
    last: Duration,
}

/// Collects how long each simulation step takes.
#[derive(Debug, Default)]
pub struct TickMonitor {
    stats: Mutex<TickStats>,
}

impl TickMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TickStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one step duration. Zero durations are ignored.
    pub fn observe(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let mut stats = self.lock();
        stats.samples += 1;
        stats.total += duration;
        stats.max = stats.max.max(duration);
        stats.last = duration;
    }

    pub fn snapshot(&self) -> TickMetrics {
        let stats = self.lock();
        let average = if stats.samples == 0 {
            Duration::ZERO
        } else {
            stats.total.div_f64(stats.samples as f64)
        };
        TickMetrics {
            samples: stats.samples,
            average,
            max: stats.max,
            last: stats.last,
        }
    }

    pub fn reset(&self) {
        *self.lock() = TickStats::default();
    }
}

/// A non-empty diff and its tick number.
#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub tick: u64,
    pub diff: TickDiff,
}

/// Drives the world at a fixed step until `shutdown` flips to `true`.
///
/// Ticks only count when they produce changes, so subscribers see a gap-free
/// sequence of updates.
pub async fn simulation_task(
    world: Arc<WorldState>,
    updates_tx: broadcast::Sender<TickUpdate>,
    settings: SimulationSettings,
    monitor: Arc<TickMonitor>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut stepper = FixedStepper::new(settings.step());
    let mut interval = tokio::time::interval(stepper.step());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = interval.tick().await;
    let mut tick: u64 = 0;

    info!(step_ms = stepper.step().as_secs_f64() * 1000.0, "simulation loop started");

    loop {
        let now = tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            now = interval.tick() => now,
        };

        let steps = stepper.accumulate(now.duration_since(last));
        last = now;
        if steps > 1 {
            debug!(steps, "simulation catching up");
        }

        for _ in 0..steps {
            let started = std::time::Instant::now();
            let diff = world.advance_tick(stepper.step());
            monitor.observe(started.elapsed());

            if !diff.has_changes() {
                continue;
            }
            tick += 1;
            // No subscribers is fine; the update is simply dropped.
            let _ = updates_tx.send(TickUpdate { tick, diff });
        }
    }

    info!(tick, "simulation loop stopped");
}
