// Framework bootstrap for the simulation broker runtime.

use crate::domain::tuning::LoadoutCatalog;
use crate::domain::{PlaneField, SignedDistanceField, Vec3, VehicleSource};
use crate::frameworks::config;
use crate::interface_adapters::net::{diff_serializer, radar_forwarder};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    RadarProcessor, Scanner, ScannerOptions, SimulationSettings, TickMonitor, VehicleRoster,
    WorldState, simulation_task,
};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Background tasks that outlive a single request.
struct Services {
    state: Arc<AppState>,
    scanner: Scanner,
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    // build state
    let services = start_services(shutdown_rx);
    let app = app(Arc::clone(&services.state));

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });

    let _ = shutdown_tx.send(true);
    services.scanner.stop().await;
    tracing::info!(
        tracked_contacts = services.scanner.tracked_contacts(),
        vehicles = services.state.world.vehicles.len(),
        "shutdown complete"
    );
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn start_services(shutdown: watch::Receiver<bool>) -> Services {
    let world = Arc::new(WorldState::new());
    let tick_monitor = Arc::new(TickMonitor::new());
    let catalogue = Arc::new(LoadoutCatalog::embedded().clone());

    let (updates_tx, updates_rx) = broadcast::channel(config::TICK_BROADCAST_CAPACITY);
    let (outbound_tx, _) = broadcast::channel(config::OUTBOUND_BROADCAST_CAPACITY);
    let (latest_diff_tx, _) = watch::channel(Arc::<str>::from(""));
    let (contacts_tx, contacts_rx) = mpsc::channel(config::RADAR_CHANNEL_CAPACITY);

    let settings = SimulationSettings {
        tick_rate_hz: config::tick_rate_hz(),
    };
    tracing::debug!(
        tick_rate_hz = settings.tick_rate_hz,
        loadouts = catalogue.loadouts().len(),
        "simulation configured"
    );
    tokio::spawn(simulation_task(
        Arc::clone(&world),
        updates_tx,
        settings,
        Arc::clone(&tick_monitor),
        shutdown.clone(),
    ));
    tokio::spawn(diff_serializer(
        updates_rx,
        outbound_tx.clone(),
        latest_diff_tx.clone(),
    ));
    tokio::spawn(radar_forwarder(contacts_rx, outbound_tx.clone()));

    let roster: Arc<dyn VehicleSource> =
        Arc::new(VehicleRoster::new(Arc::clone(&world), Arc::clone(&catalogue)));
    let processor = Arc::new(RadarProcessor::new(Some(contacts_tx)));
    let field = config::radar_ground_level().map(|level| {
        Arc::new(PlaneField::new(Vec3::new(0.0, level, 0.0), Vec3::new(0.0, 1.0, 0.0)))
            as Arc<dyn SignedDistanceField>
    });
    let scanner = Scanner::new(ScannerOptions {
        vehicles: Some(roster),
        field,
        handler: Some(processor.frame_handler()),
        interval: config::radar_scan_interval(),
        last_known_ttl: config::radar_last_known_ttl(),
        loadouts: catalogue,
        ..ScannerOptions::default()
    });
    scanner.start(Some(shutdown));

    Services {
        state: Arc::new(AppState {
            world,
            tick_monitor,
            outbound_tx,
            latest_diff_tx,
        }),
        scanner,
    }
}
