use rocket::serde::json::Json;
use thiserror::Error;

use crate::{ApiError, ErrorDetail};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(detail) => ApiError::NotFound(Json(ErrorDetail { error: detail })),
            ServiceError::Conflict(detail) => ApiError::BadRequest(Json(ErrorDetail { error: detail })),
            ServiceError::InvalidInput(detail) => {
                ApiError::UnprocessableEntity(Json(ErrorDetail { error: detail }))
            }
            other => ApiError::InternalError(Json(ErrorDetail {
                error: other.to_string(),
            })),
        }
    }
}
