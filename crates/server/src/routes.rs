use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Readiness};
use models::{DeviceFields, InstallationFields, ProductFields, RenewalFields, RmaFields, ScheduleFields};

use crate::state::ServerState;

pub mod records;
pub mod overview;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn ready(State(state): State<ServerState>) -> Json<Readiness> {
    Json(Readiness { ready: state.store.is_ready() })
}

/// Build the full application router: health, readiness, the six record
/// sets, dashboard and route lookup.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/ready", get(ready))
        .route("/api/dashboard", get(overview::dashboard))
        .route("/api/route", get(overview::route_to));

    let api = records::with_records::<ScheduleFields>(api);
    let api = records::with_records::<RenewalFields>(api);
    let api = records::with_records::<RmaFields>(api);
    let api = records::with_records::<InstallationFields>(api);
    let api = records::with_records::<ProductFields>(api);
    let api = records::with_records::<DeviceFields>(api);

    api.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{body::Body, http::{Request, StatusCode}};
    use common::geo::{LatLng, RouteClient};
    use service::{storage::MemorySubstrate, DataStore};
    use tower::ServiceExt;

    use super::*;

    fn app(store: Arc<DataStore>) -> Router {
        let routes = RouteClient::new("http://127.0.0.1:1", "http://127.0.0.1:1", LatLng { lat: 0.0, lng: 0.0 }, Duration::from_secs(1))
            .expect("route client");
        build_router(ServerState { store, routes: Arc::new(routes) }, CorsLayer::very_permissive())
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn ready_flag_tracks_hydration() {
        let store = DataStore::new(Arc::new(MemorySubstrate::new()));
        let res = app(store.clone()).oneshot(Request::get("/api/ready").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(body_json(res).await["ready"], false);

        store.hydrate().await;
        let res = app(store).oneshot(Request::get("/api/ready").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(body_json(res).await["ready"], true);
    }

    #[tokio::test]
    async fn unhydrated_store_answers_service_unavailable() {
        let store = DataStore::new(Arc::new(MemorySubstrate::new()));
        let res = app(store).oneshot(Request::get("/api/rmas").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(res).await["error"], "Service Unavailable");
    }

    #[tokio::test]
    async fn persist_failure_maps_to_insufficient_storage() {
        let store = DataStore::open(Arc::new(MemorySubstrate::with_quota(16))).await;
        let req = Request::post("/api/devices")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Long device name","type":"sensor"}"#))
            .unwrap();
        let res = app(store.clone()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::INSUFFICIENT_STORAGE);
        assert_eq!(body_json(res).await["error"], "Persist Failed");

        // memory stays the source of truth
        let res = app(store).oneshot(Request::get("/api/devices").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(body_json(res).await.as_array().map(Vec::len), Some(1));
    }
}
