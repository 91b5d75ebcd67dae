use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rumbo_core::Error as CoreError;
use serde::Serialize;

pub enum ApiError {
    Core(CoreError),
    Validation(&'static str),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                reason.to_string(),
            ),
            ApiError::Core(err) => {
                let (status, code) = match &err {
                    CoreError::SameLocation => (StatusCode::CONFLICT, "already_at_destination"),
                    CoreError::UnknownPosition => (StatusCode::CONFLICT, "position_unknown"),
                    CoreError::SessionNotActive => (StatusCode::NOT_FOUND, "no_active_route"),
                    CoreError::Geocode(_) => (StatusCode::NOT_FOUND, "destination_not_found"),
                    CoreError::NoPath | CoreError::NoPointsFound => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "routing_failed")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
                };
                (status, code, err.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}
