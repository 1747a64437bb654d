//! CLI error types and result alias.

use cql_demos_client::DemoError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(cql_demos::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(cql_demos::config),
        help("check the settings file passed with --config")
    )]
    Config(String),

    /// Error raised by the driver or the cluster
    #[error(transparent)]
    #[diagnostic(code(cql_demos::cluster))]
    Cluster(#[from] DemoError),

    /// Embedded server error
    #[error("Embedded server error: {0}")]
    #[diagnostic(code(cql_demos::embedded))]
    Embedded(String),

    /// Background task failure
    #[error("Task error: {0}")]
    #[diagnostic(code(cql_demos::task))]
    Task(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {err}"))
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        CliError::Task(err.to_string())
    }
}
