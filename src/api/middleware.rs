use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor whose rejections (bad syntax, wrong content type,
/// missing fields) all surface as `AppError::BadRequest`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path extractor that turns unparseable ids into `AppError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);
