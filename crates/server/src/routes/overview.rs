use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use common::geo::RouteSummary;
use serde::Deserialize;
use service::dashboard::DashboardSummary;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<DashboardSummary>, JsonApiError> {
    Ok(Json(state.store.summary(Utc::now()).await?))
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub address: String,
}

/// Route from the configured origin to `address`; `null` when either lookup fails.
pub async fn route_to(
    State(state): State<ServerState>,
    Query(q): Query<RouteQuery>,
) -> Json<Option<RouteSummary>> {
    Json(state.routes.resolve_route(&q.address).await)
}
