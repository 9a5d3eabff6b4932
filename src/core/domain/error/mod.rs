mod error_report;

pub use error_report::{ErrorReport, FieldMappingError};

use thiserror::Error;

/// The main error type for ProxmoxVE operations.
///
/// This enum represents every failure that aborts an operation: connection
/// and authentication problems, validation failures, and failed remote
/// queries. Field-level mapping failures are not part of it; they are
/// collected into an [`ErrorReport`] instead.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Represents errors that occur during connection attempts
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the connection attempt
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents validation failures with detailed context
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote read of a node's settings failed
    ///
    /// # Fields
    /// * `node` - The node that was queried
    /// * `source` - Whatever the transport layer reported
    #[error("Remote query for node '{node}' failed: {source}")]
    RemoteQuery {
        node: String,
        #[source]
        source: Box<ProxmoxError>,
    },
}

impl ProxmoxError {
    /// Wraps `self` as the cause of a failed remote query against `node`.
    pub(crate) fn into_remote_query(self, node: impl Into<String>) -> Self {
        ProxmoxError::RemoteQuery {
            node: node.into(),
            source: Box::new(self),
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_remote_query_keeps_cause() {
        let err = ProxmoxError::Connection("connection refused".to_string()).into_remote_query("pve3");

        assert!(matches!(&err, ProxmoxError::RemoteQuery { node, .. } if node == "pve3"));
        assert_eq!(
            err.to_string(),
            "Remote query for node 'pve3' failed: Connection error: connection refused"
        );
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "Connection error: connection refused");
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ProxmoxError = ValidationError::Format("bad".to_string()).into();
        assert!(matches!(err, ProxmoxError::Validation(ValidationError::Format(_))));
    }
}
