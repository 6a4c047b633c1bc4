//! API error types for place handlers
//!
//! Failures leave the service as a bare status code: 400 for requests the
//! client got wrong, 500 for everything else. The details go to the log.
//!
//! # Example
//!
//! ```rust
//! use pa_donde::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::bad_request(ApiOperation::Get, "Place id is not a number")
//!     .with_entity_id("abc");
//! assert_eq!(error.kind, ApiErrorKind::BadRequest);
//! assert_eq!(error.entity_id.as_deref(), Some("abc"));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::repository::{RepositoryError, RepositoryOperation};

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing every place
    ListAll,
    /// Listing one page of places
    ListPage,
    /// Getting a single place by id
    Get,
    /// Creating a place
    Create,
    /// Updating a place
    Update,
    /// Deleting a place
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListAll => write!(f, "list_all"),
            Self::ListPage => write!(f, "list_page"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Unparsable id or malformed body
    BadRequest,
    /// Store failure, missing request context, or anything unexpected
    InternalError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Message for the log; never sent to the client
    pub message: String,
    /// The place id as the client sent it
    pub entity_id: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a bad request error
    pub fn bad_request(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::BadRequest, message)
    }

    /// Create an internal error
    pub fn internal(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::InternalError, message)
    }

    /// Attach the id of the place involved
    #[must_use]
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Replace the operation
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// HTTP status this error renders as
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref id) = self.entity_id {
            write!(f, " [Place: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        tracing::error!(
            operation = %self.operation,
            kind = %self.kind,
            entity_id = ?self.entity_id,
            status = status.as_u16(),
            "API error: {}", self.message
        );

        status.into_response()
    }
}

fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::FindAll => ApiOperation::ListAll,
        RepositoryOperation::FindPage => ApiOperation::ListPage,
        RepositoryOperation::Insert => ApiOperation::Create,
        RepositoryOperation::Update => ApiOperation::Update,
        RepositoryOperation::Delete => ApiOperation::Delete,
        RepositoryOperation::FindById
        | RepositoryOperation::Migrate
        | RepositoryOperation::Connect => ApiOperation::Get,
    }
}

/// Every store failure is an internal error, missing records included
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let mut api = ApiError::internal(
            repository_operation_to_api_operation(err.operation),
            err.to_string(),
        );
        api.entity_id = err.entity_id.map(|id| id.to_string());
        api
    }
}
