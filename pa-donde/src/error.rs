//! Startup and infrastructure errors
//!
//! Request-time failures are expressed as
//! [`ApiError`](crate::handlers::ApiError); this type covers everything that
//! can go wrong before the server accepts its first connection.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Service-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but violates a constraint
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Store failure during startup (connect, migrate)
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;

    #[test]
    fn test_repository_error_keeps_its_message() {
        let err: Error = RepositoryError::connection_failed("database is locked").into();
        assert!(err.to_string().contains("database is locked"));
        assert!(matches!(err, Error::Repository(_)));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig("service.port must not be 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: service.port must not be 0"
        );
    }

    #[test]
    fn test_repository_operation_survives_conversion() {
        let err: Error = RepositoryError::database_error(RepositoryOperation::Migrate, "boom").into();
        match err {
            Error::Repository(inner) => assert_eq!(inner.operation, RepositoryOperation::Migrate),
            other => panic!("unexpected error: {other}"),
        }
    }
}
