// Shared fixtures for the integration tests: a bootstrapped server and radar doubles.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use sim_broker::domain::{RadarFrame, Vec3, VehicleSource, VehicleState};

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // The server gets its own OS thread and runtime so it outlives each test's runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                sim_broker::run(listener).await.expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

/// Vehicle source whose roster the test rewrites between sweeps.
pub struct StubVehicles {
    states: Mutex<Vec<VehicleState>>,
    loadouts: HashMap<String, String>,
}

impl StubVehicles {
    pub fn new(states: Vec<VehicleState>) -> Arc<Self> {
        Arc::new(Self {
            states: Mutex::new(states),
            loadouts: HashMap::new(),
        })
    }

    pub fn set(&self, states: Vec<VehicleState>) {
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

// Observer at the origin, target 500 m down the x axis.
pub fn observer_and_target() -> Vec<VehicleState> {
    vec![
        VehicleState::new("observer", Vec3::ZERO),
        VehicleState::new("target", Vec3::new(500.0, 0.0, 0.0)),
    ]
}

/// Collects frames handed to a scanner handler.
#[derive(Clone, Default)]
pub struct FrameSink {
    frames: Arc<Mutex<Vec<RadarFrame>>>,
}

impl FrameSink {
    pub fn handler(&self) -> sim_broker::use_cases::FrameHandler {
        let frames = Arc::clone(&self.frames);
        Arc::new(move |frame| frames.lock().expect("sink mutex poisoned").push(frame))
    }

    pub fn len(&self) -> usize {
        self.frames.lock().expect("sink mutex poisoned").len()
    }

    pub fn take(&self) -> Vec<RadarFrame> {
        std::mem::take(&mut *self.frames.lock().expect("sink mutex poisoned"))
    }
}
