//! CRUD handlers shared by every record set, mounted at `/api/<slot>`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::{Record, RecordId};
use service::collection::StoredKind;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Mount `GET|POST /api/<slot>` and `GET|PUT|DELETE /api/<slot>/:id`.
pub fn with_records<F: StoredKind>(router: Router<ServerState>) -> Router<ServerState> {
    let base = format!("/api/{}", F::SLOT);
    router
        .route(&base, get(list::<F>).post(create::<F>))
        .route(&format!("{base}/:id"), get(fetch::<F>).put(update::<F>).delete(remove::<F>))
}

pub async fn list<F: StoredKind>(State(state): State<ServerState>) -> Result<Json<Vec<Record<F>>>, JsonApiError> {
    Ok(Json(state.store.list::<F>().await?))
}

pub async fn fetch<F: StoredKind>(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Record<F>>, JsonApiError> {
    state
        .store
        .get::<F>(&RecordId::from(id))
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(F::LABEL))
}

pub async fn create<F: StoredKind>(
    State(state): State<ServerState>,
    Json(fields): Json<F>,
) -> Result<(StatusCode, Json<Record<F>>), JsonApiError> {
    fields.validate()?;
    let record = state.store.add(fields).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Full replace. The store ignores unknown ids; here that becomes a 404.
pub async fn update<F: StoredKind>(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(fields): Json<F>,
) -> Result<Json<Record<F>>, JsonApiError> {
    fields.validate()?;
    let id = RecordId::from(id);
    if !state.store.update(&id, fields.clone()).await? {
        return Err(JsonApiError::not_found(F::LABEL));
    }
    Ok(Json(Record::new(id, fields)))
}

pub async fn remove<F: StoredKind>(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    if state.store.delete::<F>(&RecordId::from(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found(F::LABEL))
    }
}
