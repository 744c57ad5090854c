use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::error::{ErrorBody, ValidationErrors};
pub use server::{router, run_with_listener, spawn_with_listener};

mod categories;
mod entries;
mod server;

pub mod types {
    pub use api_types::category::Category;
    pub use api_types::entry::{Entry, EntryType};
    pub use api_types::error::{ErrorBody, ValidationErrors};
}

pub enum ServerError {
    Engine(EngineError),
    /// Body that could not be decoded into the expected record.
    Payload(JsonRejection),
    Generic(String),
}

/// Unwraps a JSON body, turning decoding failures into a 422.
pub(crate) fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    body.map(|Json(value)| value).map_err(ServerError::Payload)
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InUse(_) => StatusCode::CONFLICT,
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidData(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::InvalidData(detail) => {
            tracing::error!("corrupted record: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Engine(EngineError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrors { errors }),
            )
                .into_response(),
            ServerError::Payload(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrors {
                    errors: vec![rejection.body_text()],
                }),
            )
                .into_response(),
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                let error = message_for_engine_error(err);
                (status, Json(ErrorBody { error })).into_response()
            }
            ServerError::Generic(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
