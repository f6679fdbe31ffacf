use std::process::ExitCode;

use tracing::{error, info, warn};

use route_server::config::{AppConfig, DistanceMode};
use route_server::distance::{
    CachedDistanceProvider, DistanceBackend, MockDistanceProvider, OsrmClient,
};
use route_server::logger::init_logger;
use route_server::store::{NetworkReader, NetworkStore};
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logger() {
        eprintln!("Failed to initialise logging: {e}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;

    // Load the network (fail fast if unavailable)
    let store = NetworkStore::open(config.data_path.clone())
        .await
        .map_err(|e| format!("Failed to load network: {e}"))?;
    let network = store.snapshot().await;
    info!(
        path = %config.data_path.display(),
        stops = network.stops().len(),
        lines = network.lines().len(),
        "Loaded network"
    );
    drop(network);

    let backend = match config.distance_mode {
        DistanceMode::Osrm => {
            info!(url = %config.osrm.base_url, profile = %config.osrm.profile, "Using OSRM");
            let client = OsrmClient::new(config.osrm.clone())
                .map_err(|e| format!("Failed to create OSRM client: {e}"))?;
            DistanceBackend::Osrm(client)
        }
        DistanceMode::Offline => {
            warn!("Using offline distance estimates");
            DistanceBackend::Offline(MockDistanceProvider::new())
        }
    };
    let distance = CachedDistanceProvider::new(backend, &config.cache);

    // Periodically pick up edits to the network file
    if let Some(period) = config.reload_interval {
        let store = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match store.reload().await {
                    Ok(count) => info!(stops = count, "Reloaded network"),
                    Err(e) => warn!(error = %e, "Failed to reload network, keeping previous"),
                }
            }
        });
    }

    let app = create_router(AppState::new(store, distance));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Bus route planner listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
