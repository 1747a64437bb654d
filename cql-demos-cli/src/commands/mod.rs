//! CLI command implementations.

use std::path::Path;

use cql_demos_client::{ApplicationProperties, Cluster};
use tracing::info;

use crate::error::{CliError, CliResult};

pub mod all;
pub mod async_select;
pub mod embedded;
pub mod orm;
pub mod paging;
pub mod prepared;
pub mod setup;
pub mod simple;
pub mod version;

/// Read the settings file and connect to the cluster it describes.
pub async fn connect(config_path: &Path) -> CliResult<Cluster> {
    info!(config = %config_path.display(), "Initialising cluster");

    if !config_path.is_file() {
        return Err(CliError::Config(format!(
            "Settings file not found: {}",
            config_path.display()
        )));
    }

    let config = ApplicationProperties::load(config_path)?.into_cluster_config()?;
    Ok(Cluster::connect(config).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_missing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let err = connect(&dir.path().join("application.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ref m) if m.starts_with("Settings file not found")));
    }

    #[tokio::test]
    async fn test_connect_requires_host() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.toml");
        std::fs::write(&path, "cluster.name = \"Test Cluster\"\n").unwrap();

        let err = connect(&path).await.unwrap_err();
        assert!(err.to_string().contains("The 'host' property must be specified"));
    }
}
