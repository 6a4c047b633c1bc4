//! Repository error types
//!
//! Structured errors for place persistence, carrying the operation that
//! failed and, when known, the id of the record involved.
//!
//! # Example
//!
//! ```rust
//! use pa_donde::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::FindById, 42);
//! assert_eq!(error.kind, RepositoryErrorKind::NotFound);
//! assert_eq!(error.entity_id, Some(42));
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Loading every place
    FindAll,
    /// Loading one page of places
    FindPage,
    /// Loading a single place by id
    FindById,
    /// Inserting a new place
    Insert,
    /// Overwriting an existing place
    Update,
    /// Removing a place
    Delete,
    /// Creating or upgrading the schema
    Migrate,
    /// Opening the store
    Connect,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindAll => write!(f, "find_all"),
            Self::FindPage => write!(f, "find_page"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Migrate => write!(f, "migrate"),
            Self::Connect => write!(f, "connect"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Record does not exist (or was deleted)
    NotFound,
    /// Failed to reach the store
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Underlying database error
    DatabaseError,
    /// Row could not be decoded into a place
    SerializationError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The id of the place involved
    pub entity_id: Option<i64>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a "not found" error for the given place id
    pub fn not_found(operation: RepositoryOperation, id: i64) -> Self {
        Self {
            operation,
            kind: RepositoryErrorKind::NotFound,
            message: "Place not found".to_string(),
            entity_id: Some(id),
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Connect,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a generic database error
    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    /// Replace the operation (used after a blanket `From` conversion)
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Attach the id of the place involved
    #[must_use]
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Whether the record was missing
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.entity_id {
            write!(f, " [Place: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        let operation = RepositoryOperation::FindAll;
        match err {
            E::RowNotFound => Self::new(operation, RepositoryErrorKind::NotFound, "Row not found"),
            E::PoolTimedOut => Self::new(
                operation,
                RepositoryErrorKind::Timeout,
                "Connection pool timed out",
            ),
            E::PoolClosed => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                "Connection pool is closed",
            ),
            E::Io(e) => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                e.to_string(),
            ),
            E::Configuration(e) => Self::new(
                RepositoryOperation::Connect,
                RepositoryErrorKind::ConnectionFailed,
                e.to_string(),
            ),
            E::ColumnDecode { index, source } => Self::new(
                operation,
                RepositoryErrorKind::SerializationError,
                format!("Failed to decode column {}: {}", index, source),
            ),
            E::Decode(e) => Self::new(
                operation,
                RepositoryErrorKind::SerializationError,
                e.to_string(),
            ),
            E::Migrate(e) => Self::database_error(RepositoryOperation::Migrate, e.to_string()),
            other => Self::database_error(operation, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(RepositoryOperation::FindAll.to_string(), "find_all");
        assert_eq!(RepositoryOperation::FindPage.to_string(), "find_page");
        assert_eq!(RepositoryOperation::FindById.to_string(), "find_by_id");
        assert_eq!(RepositoryOperation::Insert.to_string(), "insert");
        assert_eq!(RepositoryOperation::Update.to_string(), "update");
        assert_eq!(RepositoryOperation::Delete.to_string(), "delete");
        assert_eq!(RepositoryOperation::Migrate.to_string(), "migrate");
    }

    #[test]
    fn test_not_found() {
        let error = RepositoryError::not_found(RepositoryOperation::Delete, 7);
        assert!(error.is_not_found());
        assert_eq!(error.operation, RepositoryOperation::Delete);
        assert_eq!(error.entity_id, Some(7));
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::not_found(RepositoryOperation::FindById, 12);
        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("find_by_id"));
        assert!(display.contains("[Place: 12]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::database_error(RepositoryOperation::Insert, "disk full");
        assert!(!error.to_string().contains('['));
    }

    #[test]
    fn test_with_operation_and_entity() {
        let error = RepositoryError::connection_failed("refused")
            .with_operation(RepositoryOperation::Update)
            .with_entity_id(3);
        assert_eq!(error.operation, RepositoryOperation::Update);
        assert_eq!(error.kind, RepositoryErrorKind::ConnectionFailed);
        assert_eq!(error.entity_id, Some(3));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(error.is_not_found());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_sqlx_pool_timeout() {
        let error: RepositoryError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(error.kind, RepositoryErrorKind::Timeout);
    }
}
