//! Local server bootstrap for testing.
//!
//! The server is an external process: this module lays out a scratch storage
//! directory, launches the server in foreground mode with its configuration
//! file and storage location passed as system properties, polls until it
//! accepts connections, and stops it again.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use cql_demos_client::Cluster;
use tokio::process::{Child, Command};
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::EmbeddedConfig;
use crate::error::{CliError, CliResult};

/// Directories the server expects under its storage directory.
pub const STORAGE_SUBDIRS: &[&str] = &["data", "commitlog", "saved_caches", "hints"];

/// Where a run keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Scratch root, removed on teardown
    pub tmp_dir: PathBuf,
    /// Per-run storage directory under `tmp_dir/data/`
    pub storage_dir: PathBuf,
    /// Server stdout/stderr
    pub log_file: PathBuf,
}

/// Wipe `tmp_dir` and create a fresh per-run storage directory inside it.
pub fn prepare_storage(tmp_dir: &Path) -> CliResult<StorageLayout> {
    if tmp_dir.exists() {
        debug!(dir = %tmp_dir.display(), "Removing old temporary directory");
        std::fs::remove_dir_all(tmp_dir)?;
    }

    let storage_dir = tmp_dir.join("data").join(Uuid::new_v4().to_string());
    trace!(dir = %storage_dir.display(), "Creating temporary directory for server data");
    for sub in STORAGE_SUBDIRS {
        std::fs::create_dir_all(storage_dir.join(sub))?;
    }

    Ok(StorageLayout {
        tmp_dir: tmp_dir.to_path_buf(),
        log_file: tmp_dir.join("server.log"),
        storage_dir: storage_dir.canonicalize()?,
    })
}

/// Resolve the server configuration file, failing if it does not exist.
pub fn locate_server_config(path: &Path) -> CliResult<PathBuf> {
    if !path.is_file() {
        return Err(CliError::Embedded(format!(
            "Cassandra config not available at {}",
            path.display()
        )));
    }
    Ok(path.canonicalize()?)
}

/// Launcher arguments: foreground mode plus the config and storage locations.
pub fn server_args(server_config: &Path, storage_dir: &Path) -> Vec<String> {
    vec![
        "-f".to_string(),
        format!("-Dcassandra.config=file:{}", server_config.display()),
        "-Dcassandra-foreground=true".to_string(),
        format!("-Dcassandra.storagedir={}", storage_dir.display()),
    ]
}

/// A running server process.
#[derive(Debug)]
pub struct ServerDaemon {
    child: Child,
}

impl ServerDaemon {
    /// Launch the server. Its output goes to `layout.log_file`.
    pub fn activate(command: &Path, args: &[String], layout: &StorageLayout) -> CliResult<Self> {
        let log = File::create(&layout.log_file)?;
        let log_err = log.try_clone()?;

        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CliError::Embedded(format!("Unable to start {}: {e}", command.display()))
            })?;
        info!(command = %command.display(), pid = ?child.id(), "Started server daemon");

        Ok(Self { child })
    }

    /// Poll until the server accepts connections.
    ///
    /// The first probe happens after the initial delay, then one per poll
    /// interval. Fails if the process exits first or the startup deadline
    /// passes.
    pub async fn wait_until_reachable(&mut self, config: &EmbeddedConfig) -> CliResult<()> {
        let cluster_config = config.cluster_config();
        let started = Instant::now();
        let deadline = started + config.startup_timeout();
        let mut ticker = interval_at(started + config.initial_delay(), config.poll_interval());

        loop {
            tokio::select! {
                status = self.child.wait() => {
                    return Err(exited_early(status?));
                }
                _ = ticker.tick() => {
                    if Cluster::probe(&cluster_config).await {
                        info!(
                            elapsed_secs = started.elapsed().as_secs(),
                            "Server has started"
                        );
                        return Ok(());
                    }
                    if Instant::now() >= deadline {
                        return Err(CliError::Embedded(format!(
                            "Server not reachable after {}s",
                            config.startup_timeout_secs
                        )));
                    }
                    warn!("Server not yet started");
                }
            }
        }
    }

    /// Stop the server and wait for the process to go away.
    pub async fn deactivate(mut self) -> CliResult<()> {
        if self.child.try_wait()?.is_none() {
            self.child.kill().await?;
        }
        info!("Server daemon stopped");
        Ok(())
    }
}

fn exited_early(status: ExitStatus) -> CliError {
    CliError::Embedded(format!(
        "Server exited before becoming reachable ({status})"
    ))
}

/// Remove the scratch directory.
pub fn remove_storage(layout: &StorageLayout) -> CliResult<()> {
    if layout.tmp_dir.exists() {
        std::fs::remove_dir_all(&layout.tmp_dir)?;
    }
    Ok(())
}
