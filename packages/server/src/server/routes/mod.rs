// HTTP routes
pub mod generate;
pub mod health;
pub mod publish;

pub use generate::*;
pub use health::*;
pub use publish::*;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

use crate::common::ApiResponse;
use crate::domains::generation::PipelineError;
use crate::domains::publishing::PublishError;

pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

pub(crate) fn bad_request<T>(message: impl Into<String>) -> ApiResult<T> {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message).with_kind("bad_request")),
    )
}

pub(crate) fn rejected<T>(rejection: JsonRejection) -> ApiResult<T> {
    bad_request(format!("Invalid request body: {}", rejection.body_text()))
}

pub fn pipeline_status(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::EmptyInput | PipelineError::Fetch(_) | PipelineError::Credential(_) => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
        PipelineError::Generation { .. } => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn pipeline_failure<T>(error: PipelineError) -> ApiResult<T> {
    (
        pipeline_status(&error),
        Json(
            ApiResponse::error(error.to_string())
                .with_kind(error.kind())
                .with_hint(error.hint()),
        ),
    )
}

pub fn publish_status(error: &PublishError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

pub(crate) fn publish_failure<T>(error: PublishError) -> ApiResult<T> {
    (
        publish_status(&error),
        Json(ApiResponse::error(error.to_string()).with_kind(error.kind())),
    )
}
