//! Periodic radar sweeps over the vehicle roster.
//!
//! Each sweep pairs every observer with every other vehicle. Targets inside the
//! observer's loadout range with a clear line of sight produce live entries; targets
//! that were seen recently but are now hidden or out of range are surfaced from a
//! per-observer memory as occluded "last known" entries whose confidence decays
//! linearly until the retention window expires.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::domain::sdf::raycast;
use crate::domain::tuning::LoadoutCatalog;
use crate::domain::{
    Clock, InterestTier, RadarContact, RadarContactEntry, RadarFrame, SignedDistanceField,
    SystemClock, Vec3, VehicleSource, VehicleState,
};

/// Receives every non-empty frame a sweep produces.
pub type FrameHandler = Arc<dyn Fn(RadarFrame) + Send + Sync>;

const DEFAULT_SCAN_FREQUENCY_HZ: f64 = 4.0;

/// Scanner configuration. Every field is optional in spirit; see [`Default`].
#[derive(Clone)]
pub struct ScannerOptions {
    /// Roster sampled each sweep. Without one, sweeps do nothing.
    pub vehicles: Option<Arc<dyn VehicleSource>>,
    /// Terrain used for line-of-sight tests. Without one, nothing is occluded.
    pub field: Option<Arc<dyn SignedDistanceField>>,
    /// Frame consumer. Defaults to discarding frames.
    pub handler: Option<FrameHandler>,
    /// Sweep period. Defaults to 4 Hz; zero selects the default.
    pub interval: Duration,
    /// How long a lost contact is remembered. Defaults to 6 s; zero selects the default.
    pub last_known_ttl: Duration,
    /// Time source. Defaults to the wall clock.
    pub clock: Arc<dyn Clock>,
    /// Stamped on every frame and contact. Defaults to `radar.v1`.
    pub schema_version: String,
    /// Resolves observer loadouts to sensor ranges. Defaults to the embedded catalogue.
    pub loadouts: Arc<LoadoutCatalog>,
}

impl ScannerOptions {
    pub fn default_interval() -> Duration {
        Duration::from_secs_f64(1.0 / DEFAULT_SCAN_FREQUENCY_HZ)
    }

    pub fn default_last_known_ttl() -> Duration {
        Duration::from_secs(6)
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            vehicles: None,
            field: None,
            handler: None,
            interval: Self::default_interval(),
            last_known_ttl: Self::default_last_known_ttl(),
            clock: Arc::new(SystemClock),
            schema_version: "radar.v1".to_string(),
            loadouts: Arc::new(LoadoutCatalog::embedded().clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct TrackedContact {
    entry: RadarContactEntry,
    // Monotonic, so a wall-clock step cannot rewind or fast-forward decay.
    seen_at: Instant,
}

#[derive(Default)]
struct SweepState {
    field: Option<Arc<dyn SignedDistanceField>>,
    frame_id: u64,
    // observer id -> target id -> last live sighting
    tracked: HashMap<String, BTreeMap<String, TrackedContact>>,
}

impl SweepState {
    fn prune_expired(&mut self, now: Instant, ttl: Duration) {
        self.tracked.retain(|_, tracker| {
            tracker.retain(|_, contact| age_at(now, contact.seen_at) <= ttl);
            !tracker.is_empty()
        });
    }
}

struct SweepCore {
    vehicles: Option<Arc<dyn VehicleSource>>,
    handler: FrameHandler,
    interval: Duration,
    last_known_ttl: Duration,
    clock: Arc<dyn Clock>,
    schema_version: String,
    loadouts: Arc<LoadoutCatalog>,
    state: Mutex<SweepState>,
}

struct SweepTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodically sweeps the vehicle roster and emits synthetic radar frames.
pub struct Scanner {
    core: Arc<SweepCore>,
    task: Mutex<Option<SweepTask>>,
}

impl Scanner {
    pub fn new(options: ScannerOptions) -> Self {
        let interval = if options.interval.is_zero() {
            ScannerOptions::default_interval()
        } else {
            options.interval
        };
        let last_known_ttl = if options.last_known_ttl.is_zero() {
            ScannerOptions::default_last_known_ttl()
        } else {
            options.last_known_ttl
        };
        let handler = options
            .handler
            .unwrap_or_else(|| Arc::new(|_frame: RadarFrame| {}));

        Self {
            core: Arc::new(SweepCore {
                vehicles: options.vehicles,
                handler,
                interval,
                last_known_ttl,
                clock: options.clock,
                schema_version: options.schema_version,
                loadouts: options.loadouts,
                state: Mutex::new(SweepState {
                    field: options.field,
                    ..SweepState::default()
                }),
            }),
            task: Mutex::new(None),
        }
    }

    fn lock_task(&self) -> MutexGuard<'_, Option<SweepTask>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn interval(&self) -> Duration {
        self.core.interval
    }

    pub fn last_known_ttl(&self) -> Duration {
        self.core.last_known_ttl
    }

    /// Spawns the sweep task on the current Tokio runtime.
    ///
    /// The task runs until `parent` flips to `true` or [`Scanner::stop`] is called.
    /// Calling `start` while the task is alive does nothing; calling it outside a
    /// runtime logs a warning and does nothing.
    pub fn start(&self, parent: Option<watch::Receiver<bool>>) {
        let mut slot = self.lock_task();
        if slot.as_ref().is_some_and(|task| !task.handle.is_finished()) {
            return;
        }
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "radar scanner needs a tokio runtime; not started");
                return;
            }
        };

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = runtime.spawn(sweep_loop(Arc::clone(&self.core), stop_rx, parent));
        *slot = Some(SweepTask { stop_tx, handle });
        info!(
            interval_ms = self.core.interval.as_millis() as u64,
            last_known_ttl_ms = self.core.last_known_ttl.as_millis() as u64,
            "radar scanner started"
        );
    }

    /// Cancels the sweep task and waits for it to exit. No frame is delivered once
    /// this returns.
    pub async fn stop(&self) {
        let task = self.lock_task().take();
        let Some(task) = task else {
            return;
        };

        let _ = task.stop_tx.send(true);
        if let Err(e) = task.handle.await {
            if e.is_panic() {
                error!(error = %e, "radar sweep task panicked");
            }
        }
        info!("radar scanner stopped");
    }

    pub fn is_running(&self) -> bool {
        self.lock_task()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Performs one sweep and hands the frame, if any, to the handler.
    pub fn sweep(&self) {
        self.core.sweep();
    }

    /// Replaces the occlusion field used by subsequent sweeps.
    pub fn set_field(&self, field: Option<Arc<dyn SignedDistanceField>>) {
        self.core.lock_state().field = field;
    }

    /// Number of observer/target pairs currently remembered.
    pub fn tracked_contacts(&self) -> usize {
        self.core
            .lock_state()
            .tracked
            .values()
            .map(BTreeMap::len)
            .sum()
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        let slot = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.handle.abort();
        }
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("interval", &self.core.interval)
            .field("last_known_ttl", &self.core.last_known_ttl)
            .field("schema_version", &self.core.schema_version)
            .finish_non_exhaustive()
    }
}

async fn sweep_loop(
    core: Arc<SweepCore>,
    mut stop_rx: watch::Receiver<bool>,
    mut parent: Option<watch::Receiver<bool>>,
) {
    // First sweep happens one interval after start.
    let start = tokio::time::Instant::now() + core.interval;
    let mut ticker = tokio::time::interval_at(start, core.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = parent_cancelled(&mut parent) => {
                debug!("radar scanner cancelled by parent");
                break;
            }
            _ = ticker.tick() => core.sweep(),
        }
    }
}

// Resolves once the parent signal turns true; never resolves without a parent.
async fn parent_cancelled(parent: &mut Option<watch::Receiver<bool>>) {
    if let Some(rx) = parent {
        if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
            return;
        }
    }
    std::future::pending::<()>().await
}

impl SweepCore {
    fn lock_state(&self) -> MutexGuard<'_, SweepState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sweep(&self) {
        if let Some(frame) = self.build_frame() {
            debug!(
                frame_id = frame.frame_id,
                sources = frame.contacts.len(),
                "radar frame emitted"
            );
            (self.handler)(frame);
        }
    }

    fn build_frame(&self) -> Option<RadarFrame> {
        let vehicles = self.vehicles.as_ref()?;
        let mut state = self.lock_state();
        let now = self.clock.monotonic();
        let ttl = self.last_known_ttl;

        let roster = vehicles.snapshot();
        if roster.is_empty() {
            state.prune_expired(now, ttl);
            return None;
        }

        let SweepState { field, tracked, .. } = &mut *state;
        let field = field.as_deref();
        let mut contacts = Vec::with_capacity(roster.len());
        for observer in &roster {
            if observer.vehicle_id.is_empty() {
                continue;
            }
            let range = self
                .loadouts
                .radar_range(&vehicles.loadout_for(&observer.vehicle_id));
            let tracker = tracked.entry(observer.vehicle_id.clone()).or_default();
            let entries = self.collect_entries(field, tracker, observer, range, &roster, now);
            if entries.is_empty() {
                continue;
            }
            contacts.push(RadarContact {
                schema_version: self.schema_version.clone(),
                source_entity_id: observer.vehicle_id.clone(),
                entries,
            });
        }

        if contacts.is_empty() {
            state.prune_expired(now, ttl);
            return None;
        }

        state.frame_id += 1;
        let frame = RadarFrame {
            schema_version: self.schema_version.clone(),
            frame_id: state.frame_id,
            emitter_entity_id: String::new(),
            captured_at_ms: unix_millis(self.clock.now()),
            contacts,
        };
        // Bound the memory to pairs seen within one retention window.
        state.prune_expired(now, ttl);
        Some(frame)
    }

    fn collect_entries(
        &self,
        field: Option<&dyn SignedDistanceField>,
        tracker: &mut BTreeMap<String, TrackedContact>,
        observer: &VehicleState,
        range: f64,
        roster: &[VehicleState],
        now: Instant,
    ) -> Vec<RadarContactEntry> {
        let ttl = self.last_known_ttl;
        let mut entries = Vec::new();
        let mut touched = HashSet::new();

        for target in roster {
            let target_id = target.vehicle_id.as_str();
            if target_id.is_empty() || target_id == observer.vehicle_id {
                continue;
            }

            let distance = observer.position.distance(target.position);
            if distance <= range
                && !self.is_occluded(field, observer.position, target.position, distance)
            {
                let entry = live_entry(target);
                tracker.insert(
                    target_id.to_string(),
                    TrackedContact {
                        entry: entry.clone(),
                        seen_at: now,
                    },
                );
                touched.insert(target_id);
                entries.push(entry);
                continue;
            }

            if let Some(contact) = tracker.get(target_id) {
                let age = age_at(now, contact.seen_at);
                if age > ttl {
                    continue;
                }
                entries.push(self.last_known_entry(contact, age));
                touched.insert(target_id);
            }
        }

        // Targets that left the roster fade out the same way as hidden ones.
        tracker.retain(|target_id, contact| {
            if touched.contains(target_id.as_str()) {
                return true;
            }
            let age = age_at(now, contact.seen_at);
            if age > ttl {
                return false;
            }
            entries.push(self.last_known_entry(contact, age));
            true
        });

        entries
    }

    fn is_occluded(
        &self,
        field: Option<&dyn SignedDistanceField>,
        origin: Vec3,
        target: Vec3,
        distance: f64,
    ) -> bool {
        let Some(field) = field else {
            return false;
        };
        let direction = target - origin;
        // Coincident craft have nothing between them.
        if direction.try_normalize().is_none() {
            return false;
        }

        let tuning = self.loadouts.radar_tuning();
        let result = raycast(
            field,
            origin,
            direction,
            distance,
            tuning.occlusion_max_steps,
            tuning.occlusion_epsilon_m,
        );
        result.hit && result.distance < distance - tuning.occlusion_epsilon_m
    }

    fn last_known_entry(&self, contact: &TrackedContact, age: Duration) -> RadarContactEntry {
        let mut entry = contact.entry.clone();
        entry.occluded = true;
        entry.confidence = self.confidence_for_age(age);
        entry
    }

    fn confidence_for_age(&self, age: Duration) -> f64 {
        let floor = self.loadouts.radar_tuning().min_confidence;
        let ratio = 1.0 - age.as_secs_f64() / self.last_known_ttl.as_secs_f64();
        ratio.max(floor)
    }
}

fn live_entry(target: &VehicleState) -> RadarContactEntry {
    RadarContactEntry {
        target_entity_id: target.vehicle_id.clone(),
        position: target.position,
        velocity: target.velocity,
        confidence: 1.0,
        occluded: false,
        suggested_tier: InterestTier::Radar,
    }
}

fn age_at(now: Instant, seen_at: Instant) -> Duration {
    now.saturating_duration_since(seen_at)
}

fn unix_millis(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SphereField;

    struct StubVehicles {
        states: Mutex<Vec<VehicleState>>,
        loadouts: HashMap<String, String>,
    }

    impl StubVehicles {
        fn new(states: Vec<VehicleState>) -> Arc<Self> {
            Arc::new(Self {
                states: Mutex::new(states),
                loadouts: HashMap::from([("observer".to_string(), "skiff-raider".to_string())]),
            })
        }

        fn set(&self, states: Vec<VehicleState>) {
            *self.states.lock().expect("stub mutex poisoned") = states;
        }
    }

    impl VehicleSource for StubVehicles {
        fn snapshot(&self) -> Vec<VehicleState> {
            self.states.lock().expect("stub mutex poisoned").clone()
        }

        fn loadout_for(&self, vehicle_id: &str) -> String {
            self.loadouts.get(vehicle_id).cloned().unwrap_or_default()
        }
    }

    // Manually advanced time source so decay assertions are deterministic.
    struct ManualClock {
        origin: Instant,
        elapsed: Mutex<Duration>,
        wall: Mutex<SystemTime>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                origin: Instant::now(),
                elapsed: Mutex::new(Duration::ZERO),
                wall: Mutex::new(UNIX_EPOCH + Duration::from_secs(1_000)),
            })
        }

        fn advance(&self, by: Duration) {
            *self.elapsed.lock().expect("clock mutex poisoned") += by;
            *self.wall.lock().expect("clock mutex poisoned") += by;
        }

        // Moves only the wall clock, as an NTP correction would.
        fn step_wall_back(&self, by: Duration) {
            *self.wall.lock().expect("clock mutex poisoned") -= by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> SystemTime {
            *self.wall.lock().expect("clock mutex poisoned")
        }

        fn monotonic(&self) -> Instant {
            self.origin + *self.elapsed.lock().expect("clock mutex poisoned")
        }
    }

    type Frames = Arc<Mutex<Vec<RadarFrame>>>;

    fn pair(target_x: f64) -> Vec<VehicleState> {
        vec![
            VehicleState::new("observer", Vec3::ZERO),
            VehicleState::new("target", Vec3::new(target_x, 0.0, 0.0)),
        ]
    }

    fn blocker() -> Arc<dyn SignedDistanceField> {
        Arc::new(SphereField {
            center: Vec3::new(250.0, 0.0, 0.0),
            radius: 25.0,
        })
    }

    fn scanner(
        vehicles: Arc<StubVehicles>,
        clock: Arc<ManualClock>,
        ttl: Duration,
    ) -> (Scanner, Frames) {
        let frames: Frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let scanner = Scanner::new(ScannerOptions {
            vehicles: Some(vehicles),
            handler: Some(Arc::new(move |frame| {
                sink.lock().expect("frames mutex poisoned").push(frame)
            })),
            last_known_ttl: ttl,
            clock,
            ..ScannerOptions::default()
        });
        (scanner, frames)
    }

    fn take(frames: &Frames) -> Vec<RadarFrame> {
        std::mem::take(&mut *frames.lock().expect("frames mutex poisoned"))
    }

    fn observer_entries(frame: &RadarFrame) -> Vec<RadarContactEntry> {
        frame
            .contacts
            .iter()
            .find(|contact| contact.source_entity_id == "observer")
            .map(|contact| contact.entries.clone())
            .unwrap_or_default()
    }

    #[test]
    fn when_options_are_defaulted_then_documented_values_apply() {
        let scanner = Scanner::new(ScannerOptions {
            interval: Duration::ZERO,
            last_known_ttl: Duration::ZERO,
            ..ScannerOptions::default()
        });

        assert_eq!(scanner.interval(), Duration::from_millis(250));
        assert_eq!(scanner.last_known_ttl(), Duration::from_secs(6));
        assert!(!scanner.is_running());
    }

    #[test]
    fn when_target_is_in_range_and_visible_then_live_entry_is_emitted() {
        let vehicles = StubVehicles::new(pair(500.0));
        let (scanner, frames) = scanner(vehicles, ManualClock::new(), Duration::ZERO);

        scanner.sweep();

        let frames = take(&frames);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].schema_version, "radar.v1");
        let entries = observer_entries(&frames[0]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target_entity_id, "target");
        assert_eq!(entries[0].confidence, 1.0);
        assert!(!entries[0].occluded);
        assert_eq!(entries[0].suggested_tier, InterestTier::Radar);
    }

    #[test]
    fn when_target_is_out_of_range_then_no_frame_is_emitted() {
        let vehicles = StubVehicles::new(pair(2_000.0));
        let (scanner, frames) = scanner(vehicles, ManualClock::new(), Duration::ZERO);

        scanner.sweep();

        assert!(take(&frames).is_empty());
        assert_eq!(scanner.tracked_contacts(), 0);
    }

    #[test]
    fn when_target_becomes_occluded_then_last_known_position_is_kept() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let (scanner, frames) = scanner(Arc::clone(&vehicles), Arc::clone(&clock), Duration::ZERO);
        scanner.sweep();
        take(&frames);

        clock.advance(Duration::from_millis(250));
        vehicles.set(pair(510.0));
        scanner.set_field(Some(blocker()));
        scanner.sweep();

        let frames = take(&frames);
        assert_eq!(frames.len(), 1);
        let entries = observer_entries(&frames[0]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].occluded);
        assert!(entries[0].confidence < 1.0);
        assert_eq!(entries[0].position.x, 500.0);
    }

    #[test]
    fn when_contact_stays_hidden_then_confidence_decays_to_floor_and_expires() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let (scanner, frames) = scanner(vehicles, Arc::clone(&clock), Duration::ZERO);
        scanner.sweep();
        take(&frames);
        scanner.set_field(Some(blocker()));

        let mut confidences = Vec::new();
        for _ in 0..5 {
            clock.advance(Duration::from_secs(1));
            scanner.sweep();
            let swept = take(&frames);
            confidences.push(observer_entries(&swept[0])[0].confidence);
        }
        assert!(confidences.windows(2).all(|pair| pair[1] < pair[0]));
        assert!((confidences[0] - (1.0 - 1.0 / 6.0)).abs() < 1e-9);

        // Age exactly at the TTL is still surfaced, at the floor.
        clock.advance(Duration::from_secs(1));
        scanner.sweep();
        let at_ttl = take(&frames);
        assert_eq!(observer_entries(&at_ttl[0])[0].confidence, 0.1);

        clock.advance(Duration::from_millis(100));
        scanner.sweep();
        assert!(take(&frames).is_empty());
        assert_eq!(scanner.tracked_contacts(), 0);
    }

    #[test]
    fn when_wall_clock_steps_back_then_hidden_contact_keeps_decaying() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let (scanner, frames) = scanner(vehicles, Arc::clone(&clock), Duration::ZERO);
        scanner.sweep();
        take(&frames);
        scanner.set_field(Some(blocker()));

        clock.advance(Duration::from_secs(3));
        scanner.sweep();
        let before = observer_entries(&take(&frames)[0])[0].clone();

        clock.step_wall_back(Duration::from_secs(5));
        clock.advance(Duration::from_millis(500));
        scanner.sweep();
        let after = observer_entries(&take(&frames)[0])[0].clone();

        assert!(before.occluded && after.occluded);
        assert!((before.confidence - 0.5).abs() < 1e-9);
        assert!(after.confidence < before.confidence);
        assert!((after.confidence - (1.0 - 3.5 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn when_wall_clock_jumps_forward_then_hidden_contact_is_not_expired() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let (scanner, frames) = scanner(vehicles, Arc::clone(&clock), Duration::ZERO);
        scanner.sweep();
        take(&frames);
        scanner.set_field(Some(blocker()));

        *clock.wall.lock().expect("clock mutex poisoned") += Duration::from_secs(60);
        clock.advance(Duration::from_secs(1));
        scanner.sweep();

        let swept = take(&frames);
        assert_eq!(swept.len(), 1);
        let entries = observer_entries(&swept[0]);
        assert!((entries[0].confidence - (1.0 - 1.0 / 6.0)).abs() < 1e-9);
        assert_eq!(swept[0].captured_at_ms, 1_061_000);
    }

    #[test]
    fn when_target_leaves_roster_then_dormant_contact_fades_out() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let ttl = Duration::from_millis(500);
        let (scanner, frames) = scanner(Arc::clone(&vehicles), Arc::clone(&clock), ttl);
        scanner.sweep();
        take(&frames);

        clock.advance(Duration::from_millis(100));
        vehicles.set(vec![VehicleState::new("observer", Vec3::ZERO)]);
        scanner.sweep();
        let frames_now = take(&frames);
        assert_eq!(frames_now.len(), 1);
        let entries = observer_entries(&frames_now[0]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].occluded);
        assert!((entries[0].confidence - 0.8).abs() < 1e-9);

        clock.advance(Duration::from_secs(1));
        scanner.sweep();
        assert!(take(&frames).is_empty());
        assert_eq!(scanner.tracked_contacts(), 0);
    }

    #[test]
    fn when_roster_is_empty_then_stale_memory_is_pruned() {
        let vehicles = StubVehicles::new(pair(500.0));
        let clock = ManualClock::new();
        let ttl = Duration::from_secs(1);
        let (scanner, frames) = scanner(Arc::clone(&vehicles), Arc::clone(&clock), ttl);
        scanner.sweep();
        assert_eq!(scanner.tracked_contacts(), 2);

        vehicles.set(Vec::new());
        clock.advance(Duration::from_secs(2));
        scanner.sweep();

        assert_eq!(take(&frames).len(), 1);
        assert_eq!(scanner.tracked_contacts(), 0);
    }

    #[test]
    fn when_frames_are_emitted_then_ids_increase() {
        let vehicles = StubVehicles::new(pair(100.0));
        let (scanner, frames) = scanner(vehicles, ManualClock::new(), Duration::ZERO);

        scanner.sweep();
        scanner.sweep();

        let ids: Vec<u64> = take(&frames).iter().map(|frame| frame.frame_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn when_vehicles_share_a_position_then_occlusion_test_is_skipped() {
        let vehicles = StubVehicles::new(vec![
            VehicleState::new("observer", Vec3::new(5.0, 5.0, 5.0)),
            VehicleState::new("target", Vec3::new(5.0, 5.0, 5.0)),
        ]);
        let (scanner, frames) = scanner(vehicles, ManualClock::new(), Duration::ZERO);
        scanner.set_field(Some(blocker()));

        scanner.sweep();

        let frames = take(&frames);
        let entries = observer_entries(&frames[0]);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].occluded);
    }

    #[test]
    fn when_hit_is_at_the_target_then_it_does_not_occlude() {
        // Target parked on the surface of the sphere facing the observer.
        let vehicles = StubVehicles::new(pair(225.0));
        let (scanner, frames) = scanner(vehicles, ManualClock::new(), Duration::ZERO);
        scanner.set_field(Some(blocker()));

        scanner.sweep();

        let frames = take(&frames);
        let entries = observer_entries(&frames[0]);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].occluded);
    }

    #[test]
    fn when_vehicle_source_is_missing_then_sweep_is_silent() {
        let frames: Frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let scanner = Scanner::new(ScannerOptions {
            handler: Some(Arc::new(move |frame| {
                sink.lock().expect("frames mutex poisoned").push(frame)
            })),
            ..ScannerOptions::default()
        });

        scanner.sweep();

        assert!(take(&frames).is_empty());
    }

    #[test]
    fn when_started_outside_a_runtime_then_scanner_stays_idle() {
        let scanner = Scanner::new(ScannerOptions::default());

        scanner.start(None);

        assert!(!scanner.is_running());
    }
}
