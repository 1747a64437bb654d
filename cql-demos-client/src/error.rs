//! Error types for cluster operations.

use thiserror::Error;

/// Result type for cluster operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors that can occur while talking to the cluster.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// None of the contact points accepted a connection.
    #[error("No host available: {0}")]
    NoHostAvailable(String),

    /// Query execution error.
    #[error("Query error: {0}")]
    Query(String),

    /// Prepared statement error.
    #[error("Prepared statement error: {0}")]
    PreparedStatement(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Type conversion error.
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Timeout error.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Authentication error.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Authorization error.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Unavailable error (not enough replicas).
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Write timeout error.
    #[error("Write timeout: {0}")]
    WriteTimeout(String),

    /// Read timeout error.
    #[error("Read timeout: {0}")]
    ReadTimeout(String),

    /// Overloaded error.
    #[error("Server overloaded: {0}")]
    Overloaded(String),

    /// Syntax error in CQL.
    #[error("CQL syntax error: {0}")]
    Syntax(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    Invalid(String),

    /// A row expected to exist was not there.
    #[error("Row not found: {0}")]
    NotFound(String),

    /// Multiple rows returned when one expected.
    #[error("Multiple rows returned when one expected")]
    MultipleRowsReturned,
}

impl DemoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a type conversion error.
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// Create a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::Deserialization(msg.into())
    }

    /// Check if no contact point could be reached at all.
    #[must_use]
    pub fn is_no_host_available(&self) -> bool {
        matches!(self, Self::NoHostAvailable(_))
    }
}

// A session error that carries a server response means some node answered;
// everything else is treated as an unreachable cluster.
impl From<scylla::transport::errors::NewSessionError> for DemoError {
    fn from(err: scylla::transport::errors::NewSessionError) -> Self {
        use scylla::transport::errors::{DbError, NewSessionError};

        match &err {
            NewSessionError::DbError(DbError::AuthenticationError, msg) => {
                Self::Authentication(msg.clone())
            }
            NewSessionError::DbError(DbError::Unauthorized, msg) => {
                Self::Authorization(msg.clone())
            }
            NewSessionError::DbError(db_err, msg) => {
                Self::Connection(format!("{db_err}: {msg}"))
            }
            _ => Self::NoHostAvailable(err.to_string()),
        }
    }
}

impl From<scylla::transport::errors::QueryError> for DemoError {
    fn from(err: scylla::transport::errors::QueryError) -> Self {
        use scylla::transport::errors::QueryError;

        match &err {
            QueryError::TimeoutError => Self::Timeout("Query timed out".into()),
            QueryError::DbError(db_err, msg) => {
                use scylla::transport::errors::DbError;
                match db_err {
                    DbError::Unavailable { .. } => Self::Unavailable(msg.clone()),
                    DbError::WriteTimeout { .. } => Self::WriteTimeout(msg.clone()),
                    DbError::ReadTimeout { .. } => Self::ReadTimeout(msg.clone()),
                    DbError::Overloaded => Self::Overloaded(msg.clone()),
                    DbError::SyntaxError => Self::Syntax(msg.clone()),
                    DbError::Invalid => Self::Invalid(msg.clone()),
                    DbError::Unauthorized => Self::Authorization(msg.clone()),
                    DbError::AuthenticationError => Self::Authentication(msg.clone()),
                    _ => Self::Query(format!("{db_err}: {msg}")),
                }
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

impl From<scylla::serialize::SerializationError> for DemoError {
    fn from(err: scylla::serialize::SerializationError) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<scylla::deserialize::DeserializationError> for DemoError {
    fn from(err: scylla::deserialize::DeserializationError) -> Self {
        Self::Deserialization(err.to_string())
    }
}
