//! Integration tests for the shipped settings files.
//!
//! These tests load the sample files at the repository root the same way the
//! `cql-demos` binary does.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cql_demos::cli::config::{EMBEDDED_FILE_NAME, EmbeddedConfig, SERVER_CONFIG_PATH};
use cql_demos::client::{APPLICATION_FILE_NAME, ApplicationProperties, DemoError};
use pretty_assertions::assert_eq;

fn repo_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

/// The sample application settings point at a local node
#[test]
fn test_shipped_application_settings() {
    let props = ApplicationProperties::load(&repo_file(APPLICATION_FILE_NAME))
        .expect("Failed to load application settings");
    let config = props.into_cluster_config().expect("Invalid settings");

    assert_eq!(config.known_nodes(), ["localhost:9042".to_string()]);
    assert_eq!(config.cluster_name(), Some("Test Cluster"));
    // Blank credentials are ignored
    assert_eq!(config.username(), None);
    assert_eq!(config.password(), None);
}

/// The sample embedded settings match the built-in defaults
#[test]
fn test_shipped_embedded_settings() {
    let loaded = EmbeddedConfig::load(&repo_file(EMBEDDED_FILE_NAME))
        .expect("Failed to load embedded settings");

    assert_eq!(loaded, EmbeddedConfig::default());
    assert_eq!(loaded.initial_delay(), Duration::from_secs(5));
    assert_eq!(loaded.poll_interval(), Duration::from_secs(3));
}

/// The server configuration referenced by default is present
#[test]
fn test_server_config_is_shipped() {
    let yaml = std::fs::read_to_string(repo_file(SERVER_CONFIG_PATH))
        .expect("Server configuration missing");
    assert!(yaml.contains("cluster_name: 'EmbeddedCluster'"));
    assert!(yaml.contains("native_transport_port: 9042"));
}

/// Credentials are applied only when both halves are present
#[test]
fn test_settings_with_credentials() {
    let config = ApplicationProperties::parse(
        r#"
        cluster.name = "Prod"
        cluster.host.name = "db1.internal"
        cluster.host.port = 19042
        cluster.username = "cassandra"
        cluster.password = "secret"
        "#,
    )
    .and_then(ApplicationProperties::into_cluster_config)
    .expect("Invalid settings");

    assert_eq!(config.known_nodes(), ["db1.internal:19042".to_string()]);
    assert_eq!(config.username(), Some("cassandra"));
    assert_eq!(config.password(), Some("secret"));

    let config = ApplicationProperties::parse(
        r#"
        cluster.host.name = "db1.internal"
        cluster.username = "cassandra"
        "#,
    )
    .and_then(ApplicationProperties::into_cluster_config)
    .expect("Invalid settings");
    assert_eq!(config.username(), None);
}

/// A missing host is a configuration error
#[test]
fn test_settings_require_host() {
    let err = ApplicationProperties::parse("cluster.host.name = \"  \"\n")
        .and_then(ApplicationProperties::into_cluster_config)
        .unwrap_err();

    assert!(matches!(err, DemoError::Configuration(_)));
    assert!(err.to_string().contains("The 'host' property must be specified"));
}

/// Embedded settings only need the keys that differ from the defaults
#[test]
fn test_partial_embedded_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("embedded.toml");
    std::fs::write(&path, "port = 19042\nstartup_timeout_secs = 60\n").unwrap();

    let config = EmbeddedConfig::load(&path).unwrap();
    assert_eq!(config.port, 19042);
    assert_eq!(config.cluster_name, "EmbeddedCluster");
    assert_eq!(config.startup_timeout(), Duration::from_secs(60));
    assert_eq!(
        config.cluster_config().known_nodes(),
        ["localhost:19042".to_string()]
    );
}
