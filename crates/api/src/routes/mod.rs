//! HTTP handlers, one module per resource.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::error::{ApiError, INVALID_BODY};

/// Unwraps a JSON body, turning every rejection (bad syntax, wrong shape,
/// missing content type, body over the size limit) into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected request body");
            Err(ApiError::BadRequest(INVALID_BODY.to_string()))
        }
    }
}
