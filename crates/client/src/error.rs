use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of a resource service call.
///
/// Non-2xx responses keep their status and raw body untouched so the caller
/// decides how to present them.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: String },
    #[error("record has no id")]
    MissingId,
}

impl ClientError {
    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Raw body of the failed response, if the server answered.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Shared failure handler of every service call: logs and hands the error
/// back unchanged.
pub(crate) fn handle_error(err: ClientError) -> ClientError {
    tracing::error!("request failed: {err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_status_and_body() {
        let err = ClientError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: r#"{"errors":["x"]}"#.to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(err.body(), Some(r#"{"errors":["x"]}"#));
    }

    #[test]
    fn handler_returns_the_same_error() {
        let err = handle_error(ClientError::MissingId);
        assert!(matches!(err, ClientError::MissingId));
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
