use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cora_identity::IdentityError;
use cora_timetable::StoreError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid slot value")]
    InvalidSlot,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidSlot => StatusCode::BAD_REQUEST,
            ServiceError::Identity(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ServiceError::Identity(IdentityError::Upstream(_)) => StatusCode::FORBIDDEN,
            ServiceError::Identity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "Request failed: {self}");
        } else {
            warn!(%status, "Request rejected: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
