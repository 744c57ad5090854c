//! Categories API endpoints.

use api_types::category::Category;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, decode_body, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ServerError> {
    Ok(Json(state.engine.list_categories().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServerError> {
    Ok(Json(state.engine.category(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<Category>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ServerError> {
    let payload = decode_body(body)?;
    let category = state.engine.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    body: Result<Json<Category>, JsonRejection>,
) -> Result<Json<Category>, ServerError> {
    let payload = decode_body(body)?;
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(ServerError::Generic(
            "id in body does not match the path".to_string(),
        ));
    }

    Ok(Json(state.engine.update_category(id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
