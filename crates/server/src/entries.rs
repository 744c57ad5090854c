//! Entries API endpoints.

use api_types::entry::Entry;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, decode_body, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Entry>>, ServerError> {
    Ok(Json(state.engine.list_entries().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Entry>, ServerError> {
    Ok(Json(state.engine.entry(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<Entry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ServerError> {
    let payload = decode_body(body)?;
    let entry = state.engine.create_entry(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    body: Result<Json<Entry>, JsonRejection>,
) -> Result<Json<Entry>, ServerError> {
    let payload = decode_body(body)?;
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(ServerError::Generic(
            "id in body does not match the path".to_string(),
        ));
    }

    Ok(Json(state.engine.update_entry(id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
