//! Request extractors for place ids and bodies
//!
//! Both reject with [`ApiError`] bad requests, so an unparsable id or a body
//! that is not a place renders as a bare 400.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, Method},
};

use serde_json::{Map, Value};

use super::error::{ApiError, ApiOperation};
use crate::models::PlaceFields;

/// Operation a request performs, judged by its method
fn operation_for(method: &Method) -> ApiOperation {
    match *method {
        Method::POST => ApiOperation::Create,
        Method::PUT => ApiOperation::Update,
        Method::DELETE => ApiOperation::Delete,
        _ => ApiOperation::Get,
    }
}

/// A place id taken from the last path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceId(pub i64);

impl PlaceId {
    /// Parse a raw path segment as a place id
    pub fn parse(raw: &str, operation: ApiOperation) -> Result<Self, ApiError> {
        raw.parse::<i64>().map(PlaceId).map_err(|e| {
            ApiError::bad_request(operation, format!("Place id is not an integer: {e}"))
                .with_entity_id(raw)
        })
    }
}

impl<S> FromRequestParts<S> for PlaceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(&parts.method);
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(operation, e.body_text()))?;

        Self::parse(&raw, operation)
    }
}

/// A JSON place body
///
/// The body must be a JSON object; the content type is not checked. Missing
/// fields take their zero value and unknown keys, `ID` included, are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBody(pub PlaceFields);

impl<S> FromRequest<S> for PlaceBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(req.method());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(operation, e.body_text()))?;

        let malformed = |e: serde_json::Error| {
            ApiError::bad_request(operation, format!("Malformed place body: {e}"))
        };

        // Arrays must not fill fields by position
        let object = serde_json::from_slice::<Map<String, Value>>(&bytes).map_err(malformed)?;
        serde_json::from_value::<PlaceFields>(Value::Object(object))
            .map(PlaceBody)
            .map_err(malformed)
    }
}
