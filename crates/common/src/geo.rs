//! Geocoding and driving-route lookups
//!
//! Address → coordinate through a Nominatim-compatible `search` endpoint,
//! coordinate pair → route through an OSRM-compatible `route/v1/driving`
//! endpoint. [`RouteClient::resolve_route`] chains both and turns every
//! failure into `None` so callers simply show no route.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A resolved driving route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub destination: LatLng,
    /// `[lat, lng]` pairs from origin to destination.
    pub polyline: Vec<[f64; 2]>,
    /// Kilometres, two decimals.
    pub distance_km: f64,
    /// Whole minutes.
    pub duration_min: u64,
}

#[derive(Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lng, lat]`.
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug)]
pub struct RouteClient {
    http: reqwest::Client,
    geocode_url: String,
    route_url: String,
    origin: LatLng,
}

impl RouteClient {
    pub fn new(geocode_url: &str, route_url: &str, origin: LatLng, timeout: Duration) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("opsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;
        Ok(Self {
            http,
            geocode_url: geocode_url.trim_end_matches('/').to_string(),
            route_url: route_url.trim_end_matches('/').to_string(),
            origin,
        })
    }

    /// First match for a free-text address.
    pub async fn geocode(&self, address: &str) -> Result<LatLng, CoreError> {
        let url = format!("{}/search", self.geocode_url);
        let hits = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", address)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Network(e.to_string()))?
            .json::<Vec<GeocodeHit>>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        let hit = hits.into_iter().next().ok_or_else(|| CoreError::NoResult(address.to_string()))?;
        let lat = hit.lat.parse::<f64>().map_err(|e| CoreError::Parse(e.to_string()))?;
        let lng = hit.lon.parse::<f64>().map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(LatLng { lat, lng })
    }

    /// Driving route between two points.
    pub async fn route(&self, from: LatLng, to: LatLng) -> Result<RouteSummary, CoreError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.route_url, from.lng, from.lat, to.lng, to.lat
        );
        let body = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Network(e.to_string()))?
            .json::<OsrmResponse>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        let route = body.routes.into_iter().next().ok_or_else(|| CoreError::NoResult("route".into()))?;
        Ok(RouteSummary {
            destination: to,
            polyline: route.geometry.coordinates.into_iter().map(|[lng, lat]| [lat, lng]).collect(),
            distance_km: (route.distance / 10.0).round() / 100.0,
            duration_min: (route.duration / 60.0).round().max(0.0) as u64,
        })
    }

    /// Geocode `address` and route to it from the configured origin.
    pub async fn resolve_route(&self, address: &str) -> Option<RouteSummary> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }
        let destination = match self.geocode(address).await {
            Ok(dest) => dest,
            Err(e) => {
                warn!(%address, error = %e, "geocoding failed; no route");
                return None;
            }
        };
        match self.route(self.origin, destination).await {
            Ok(summary) => {
                debug!(%address, km = summary.distance_km, min = summary.duration_min, "route resolved");
                Some(summary)
            }
            Err(e) => {
                warn!(%address, error = %e, "routing failed; no route");
                None
            }
        }
    }
}
