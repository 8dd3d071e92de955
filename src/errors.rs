use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request-level failures. Store faults are logged where they happen and
/// wrapped here with the operation's generic customer-facing message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("요청하신 정보를 찾을 수 없습니다.")]
    NotFound,

    #[error("인증에 실패했습니다.")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
