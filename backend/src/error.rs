use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use serde::Serialize;
use thiserror::Error;
use shared::{ErrorCode, ErrorResponse, Rejection, ValidationError};
use crate::store::StoreError;

#[derive(Error, Debug, Serialize)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid id")]
    InvalidId,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::InvalidId => Status::BadRequest,
            ApiError::Unauthorized(_) => Status::Forbidden,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::RateLimited(_) => Status::TooManyRequests,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err.code {
            ErrorCode::NotFound => ApiError::NotFound(err.message),
            ErrorCode::Unauthorized => ApiError::Unauthorized(err.message),
            ErrorCode::Conflict => ApiError::Conflict(err.message),
            ErrorCode::ValidationFailed => ApiError::Validation(err.message),
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        shared::Error::from(rejection).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        shared::Error::from(err).into()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse { error: self.to_string() });

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
