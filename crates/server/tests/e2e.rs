use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use common::geo::{LatLng, RouteClient};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{storage::FileSubstrate, DataStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, state::ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    data_dir: std::path::PathBuf,
    store: Arc<DataStore>,
}

/// Start a server over an isolated data dir; the store is left unhydrated.
async fn start_unhydrated(data_dir: std::path::PathBuf) -> anyhow::Result<TestApp> {
    let store = DataStore::new(FileSubstrate::new(&data_dir).await?);
    // nothing listens on port 1, so every route lookup degrades to null
    let route_client = RouteClient::new(
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
        LatLng { lat: 0.0, lng: 0.0 },
        Duration::from_secs(2),
    )?;
    let state = ServerState { store: Arc::clone(&store), routes: Arc::new(route_client) };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir, store })
}

async fn start_server() -> anyhow::Result<TestApp> {
    let data_dir = std::env::temp_dir().join(format!("opsdesk_e2e_{}", Uuid::new_v4()));
    let app = start_unhydrated(data_dir).await?;
    app.store.hydrate().await;
    Ok(app)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_requests_before_hydration_are_unavailable() -> anyhow::Result<()> {
    let data_dir = std::env::temp_dir().join(format!("opsdesk_e2e_{}", Uuid::new_v4()));
    let app = start_unhydrated(data_dir).await?;
    let c = client();

    let ready = c.get(format!("{}/api/ready", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(ready["ready"], false);

    let res = c.get(format!("{}/api/schedules", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    let res = c
        .post(format!("{}/api/devices", app.base_url))
        .json(&json!({"name": "NVR", "type": "recorder"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);

    app.store.hydrate().await;
    let ready = c.get(format!("{}/api/ready", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(ready["ready"], true);
    let res = c.get(format!("{}/api/schedules", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_schedule_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let url = format!("{}/api/schedules", app.base_url);

    let body = json!({
        "title": "Site survey",
        "description": "Check cabling",
        "datetime": "2024-06-10T09:30",
        "location": "Warehouse 2",
        "clientType": "newclient",
        "company": "Acme",
        "contact": "Dana",
        "emailOrNumber": "dana@example.com"
    });
    let res = c.post(&url).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["clientType"], "newclient");

    // identical body twice yields distinct ids
    let again = c.post(&url).json(&body).send().await?.json::<Value>().await?;
    assert_ne!(again["id"], created["id"]);

    let mut changed = body.clone();
    changed["title"] = json!("Site survey (moved)");
    let res = c.put(format!("{url}/{id}")).json(&changed).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let list = c.get(&url).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["title"], "Site survey (moved)");

    let res = c.delete(format!("{url}/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{url}/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_validation_and_unknown_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/renewals", app.base_url))
        .json(&json!({"clientName": "", "expiryDate": "2020-01-01"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["error"], "Validation Error");

    let res = c
        .put(format!("{}/api/devices/ghost", app.base_url))
        .json(&json!({"name": "x", "type": "y"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(format!("{}/api/devices/ghost", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let list = c.get(format!("{}/api/devices", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_dashboard_counts_expired_renewals() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for (name, expiry, renewed) in [("Old Co", "2020-01-01", ""), ("Future Co", "2999-12-31", "2026-01-05")] {
        let res = c
            .post(format!("{}/api/renewals", app.base_url))
            .json(&json!({"clientName": name, "office": "HQ", "expiryDate": expiry, "renewedDate": renewed}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }
    let summary = c.get(format!("{}/api/dashboard", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(summary["renewals"], 2);
    assert_eq!(summary["expiredCount"], 1);
    assert_eq!(summary["expiredRenewals"][0]["clientName"], "Old Co");
    assert_eq!(summary["moreExpired"], 0);
    assert_eq!(summary["renewed"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_route_failure_is_null() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/api/route", app.base_url))
        .query(&[("address", "1 Main St")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn e2e_state_survives_restart() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let product = c
        .post(format!("{}/api/products", app.base_url))
        .json(&json!({"name": "Dome Cam", "category": "CCTV", "quantity": 5}))
        .send()
        .await?
        .json::<Value>()
        .await?;
    c.post(format!("{}/api/installations", app.base_url))
        .json(&json!({
            "project": "Warehouse",
            "company": "Acme",
            "dateTime": "2024-07-01T09:00",
            "location": "Dock 4",
            "devices": ["Dome Cam"]
        }))
        .send()
        .await?;
    let res = c
        .delete(format!("{}/api/products/{}", app.base_url, product["id"].as_str().expect("id")))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let restarted = start_unhydrated(app.data_dir.clone()).await?;
    restarted.store.hydrate().await;
    let installs = c
        .get(format!("{}/api/installations", restarted.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(installs.len(), 1);
    assert_eq!(installs[0]["devices"], json!(["Dome Cam"]));
    let products = c.get(format!("{}/api/products", restarted.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(products.is_empty());

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}
