//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use cql_demos_client::ClusterConfig;

use crate::error::CliResult;

/// Default settings file for the client examples
pub use cql_demos_client::APPLICATION_FILE_NAME as CONFIG_FILE_NAME;

/// Default settings file for the embedded server
pub const EMBEDDED_FILE_NAME: &str = "embedded.toml";

/// Default server configuration file (relative to the working directory)
pub const SERVER_CONFIG_PATH: &str = "resources/cassandra/cassandra.yaml";

/// Settings for the embedded server bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedConfig {
    /// Cluster name used when connecting to the started server
    pub cluster_name: String,

    /// Host the server listens on
    pub host: String,

    /// Native protocol port
    pub port: u16,

    /// Server launcher executable
    pub server_command: PathBuf,

    /// Server configuration file (`cassandra.yaml`)
    pub server_config: PathBuf,

    /// Scratch directory, wiped before every run
    pub tmp_dir: PathBuf,

    /// Delay before the first reachability probe, in seconds
    pub initial_delay_secs: u64,

    /// Delay between reachability probes, in seconds
    pub poll_interval_secs: u64,

    /// Give up if the server is not reachable after this many seconds
    pub startup_timeout_secs: u64,
}

impl Default for EmbeddedConfig {
    fn default() -> Self {
        Self {
            cluster_name: "EmbeddedCluster".to_string(),
            host: "localhost".to_string(),
            port: cql_demos_client::DEFAULT_PORT,
            server_command: PathBuf::from("cassandra"),
            server_config: PathBuf::from(SERVER_CONFIG_PATH),
            tmp_dir: PathBuf::from("tmp"),
            initial_delay_secs: 5,
            poll_interval_secs: 3,
            startup_timeout_secs: 180,
        }
    }
}

impl EmbeddedConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EmbeddedConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Connection settings for the embedded server
    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig::builder()
            .add_contact_point_with_port(&self.host, self.port)
            .cluster_name(self.cluster_name.clone())
            .build()
    }

    /// Delay before the first probe
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// Delay between probes
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Startup deadline
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}
