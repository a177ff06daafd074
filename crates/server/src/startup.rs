use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::geo::{LatLng, RouteClient};
use configs::AppConfig;
use dotenvy::dotenv;
use service::{runtime, storage::FileSubstrate, DataStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire the store (not yet hydrated) and the route client from config.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    runtime::ensure_data_dir(&cfg.storage.data_dir).await?;
    let substrate = FileSubstrate::new(&cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let store = DataStore::new(substrate);

    let routing = &cfg.routing;
    let routes = RouteClient::new(
        &routing.geocode_url,
        &routing.route_url,
        LatLng { lat: routing.origin_lat, lng: routing.origin_lng },
        Duration::from_secs(routing.timeout_secs),
    )
    .map_err(|e| StartupError::Runtime(e.to_string()))?;

    Ok(ServerState { store, routes: Arc::new(routes) })
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg).await?;
    let store = Arc::clone(&state.store);

    let app: Router = routes::build_router(state, build_cors());
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, data_dir = %cfg.storage.data_dir, "listening; hydrating store");

    // /api/ready reports false and record routes answer 503 until this completes
    tokio::spawn(async move {
        let report = store.hydrate().await;
        info!(slots = report.slots.len(), "store ready");
    });

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
