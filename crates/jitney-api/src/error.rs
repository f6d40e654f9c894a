//! Error-to-response mapping for the API layer.
//!
//! [`ApiError`] unifies the domain and data-layer failures into a single
//! enum convertible into an HTTP response. The JSON body carries a `kind`
//! discriminant so the two authorization sub-kinds (identity mismatch vs.
//! insufficient role) stay distinguishable even though both map to 403,
//! and not-found stays distinct from internal store failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jitney_core::auth::AuthError;
use jitney_types::ValidationError;

use jitney_db::{ReadError, StoreError};

/// Errors that can occur while serving an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A malformed or out-of-range ride field.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// Authentication or authorization failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal failure (store or serialization).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RideNotFound(id) => Self::NotFound(format!("ride {id}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ReadError> for ApiError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::NotFound(id) => Self::NotFound(format!("ride {id}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    /// The HTTP status and machine-readable kind for this error.
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(ValidationError::AlreadyClosed) => {
                (StatusCode::CONFLICT, "already_ended")
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            Self::Auth(AuthError::BadLogin) => (StatusCode::UNAUTHORIZED, "bad_login"),
            Self::Auth(AuthError::Unauthenticated) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated")
            }
            Self::Auth(AuthError::DriverMismatch { .. }) => {
                (StatusCode::FORBIDDEN, "driver_mismatch")
            }
            Self::Auth(AuthError::RoleInsufficient { .. }) => {
                (StatusCode::FORBIDDEN, "role_insufficient")
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": kind,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use jitney_core::auth::Role;

    use super::*;

    #[test]
    fn authorization_sub_kinds_stay_distinguishable() {
        let mismatch = ApiError::Auth(AuthError::DriverMismatch {
            login: String::from("otto"),
        });
        let role = ApiError::Auth(AuthError::RoleInsufficient { role: Role::Viewer });

        assert_eq!(mismatch.status_and_kind(), (StatusCode::FORBIDDEN, "driver_mismatch"));
        assert_eq!(role.status_and_kind(), (StatusCode::FORBIDDEN, "role_insufficient"));
    }

    #[test]
    fn not_found_is_not_an_internal_error() {
        let id = jitney_types::RideId::new();
        let err = ApiError::from(StoreError::RideNotFound(id));
        assert_eq!(err.status_and_kind().0, StatusCode::NOT_FOUND);

        let err = ApiError::from(StoreError::Config(String::from("boom")));
        assert_eq!(err.status_and_kind().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn double_close_maps_to_conflict() {
        let err = ApiError::Validation(ValidationError::AlreadyClosed);
        assert_eq!(err.status_and_kind().0, StatusCode::CONFLICT);
    }
}
