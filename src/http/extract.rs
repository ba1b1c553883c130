use crate::error::ServiceError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections answer with the usual error body.
///
/// A missing content type, unparsable JSON, or a body of the wrong shape is
/// `InvalidInput` (400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidInput(format!("invalid JSON data: {}", rejection.body_text()))
    }
}
