use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections surface as `VALIDATION_ERROR`, naming
/// the offending field when the body parsed but did not fit the request type.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
