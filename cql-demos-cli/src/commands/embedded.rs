//! `cql-demos embedded` - Start a local server, exercise it, stop it.

use std::path::Path;

use cql_demos_client::{Cluster, ResultRows, schema};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cli::EmbeddedArgs;
use crate::config::{EMBEDDED_FILE_NAME, EmbeddedConfig};
use crate::embedded::{self, ServerDaemon, StorageLayout};
use crate::error::{CliError, CliResult};
use crate::output;

/// Settings file (if any) with command-line overrides applied.
pub fn resolve_config(args: &EmbeddedArgs) -> CliResult<EmbeddedConfig> {
    let mut config = match &args.settings {
        Some(path) => EmbeddedConfig::load(path)?,
        None => {
            let default_path = Path::new(EMBEDDED_FILE_NAME);
            if default_path.is_file() {
                EmbeddedConfig::load(default_path)?
            } else {
                EmbeddedConfig::default()
            }
        }
    };

    if let Some(bin) = &args.server_bin {
        config.server_command = bin.clone();
    }
    if let Some(path) = &args.server_config {
        config.server_config = path.clone();
    }
    if let Some(dir) = &args.tmp_dir {
        config.tmp_dir = dir.clone();
    }
    if let Some(secs) = args.startup_timeout {
        config.startup_timeout_secs = secs;
    }

    Ok(config)
}

/// Run the embedded command
pub async fn run(args: EmbeddedArgs) -> CliResult<()> {
    output::header("Embedded Server");

    let config = resolve_config(&args)?;
    output::kv("Server", &config.server_command.display().to_string());
    output::kv("Config", &config.server_config.display().to_string());
    output::newline();

    output::step(1, 4, "Checking for a running server...");
    if Cluster::probe(&config.cluster_config()).await {
        return Err(CliError::Embedded(
            "Cassandra service is already running.".into(),
        ));
    }

    output::step(2, 4, "Preparing storage...");
    let server_config = embedded::locate_server_config(&config.server_config)?;
    let layout = embedded::prepare_storage(&config.tmp_dir)?;
    output::kv("Storage", &layout.storage_dir.display().to_string());

    output::step(3, 4, "Starting server...");
    let mut daemon = start_daemon(&config, &server_config, &layout)?;

    let outcome = match daemon.wait_until_reachable(&config).await {
        Ok(()) => {
            output::step(4, 4, "Running smoke test...");
            perform_test(&config).await
        }
        Err(e) => Err(e),
    };

    let cleanup = teardown(daemon, &layout).await;
    if let (Err(_), Err(e)) = (&outcome, &cleanup) {
        warn!(error = %e, "Teardown also failed");
    }
    outcome?;
    cleanup?;

    output::newline();
    output::success("Embedded server smoke test passed");
    Ok(())
}

/// Launch the server. The scratch directory is removed again if the launch fails.
fn start_daemon(
    config: &EmbeddedConfig,
    server_config: &Path,
    layout: &StorageLayout,
) -> CliResult<ServerDaemon> {
    let launch_args = embedded::server_args(server_config, &layout.storage_dir);
    ServerDaemon::activate(&config.server_command, &launch_args, layout).inspect_err(|_| {
        if let Err(e) = embedded::remove_storage(layout) {
            warn!(error = %e, dir = %layout.tmp_dir.display(), "Could not remove temporary directory");
        }
    })
}

async fn perform_test(config: &EmbeddedConfig) -> CliResult<()> {
    info!("Performing test");
    let cluster = Cluster::connect(config.cluster_config()).await?;

    let outcome = async {
        schema::create_all(&cluster).await?;
        schema::populate(&cluster).await?;
        query_tables(&cluster).await?;
        let truncated = schema::truncate_all(&cluster).await?;
        info!(tables = ?truncated, "Truncated demo tables");
        CliResult::Ok(())
    }
    .await;

    cluster.close();
    outcome
}

async fn query_tables(cluster: &Cluster) -> CliResult<()> {
    debug!("Querying tables");

    let employees = ResultRows::new(cluster.execute("SELECT * FROM demo.employees", &[]).await?);
    for row in employees.iter() {
        let id: Uuid = row.get_by_name("id")?;
        let name: String = row.get_by_name("name")?;
        let role: Option<String> = row.get_opt_by_name("role")?;
        debug!(
            id = %id,
            name = %name,
            role = role.as_deref().unwrap_or_default(),
            "Found employee"
        );
    }

    let offices = ResultRows::new(cluster.execute("SELECT * FROM demo.offices", &[]).await?);
    for row in offices.iter() {
        let id: Uuid = row.get_by_name("id")?;
        let country: Option<String> = row.get_opt_by_name("country")?;
        let city: Option<String> = row.get_opt_by_name("city")?;
        debug!(
            id = %id,
            country = country.as_deref().unwrap_or_default(),
            city = city.as_deref().unwrap_or_default(),
            "Found office"
        );
    }

    info!(
        employees = employees.len(),
        offices = offices.len(),
        "Queried demo tables"
    );
    Ok(())
}

async fn teardown(daemon: ServerDaemon, layout: &StorageLayout) -> CliResult<()> {
    let stopped = daemon.deactivate().await;
    embedded::remove_storage(layout)?;
    debug!(dir = %layout.tmp_dir.display(), "Removed temporary directory");
    stopped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> EmbeddedArgs {
        EmbeddedArgs {
            settings: None,
            server_bin: None,
            server_config: None,
            tmp_dir: None,
            startup_timeout: None,
        }
    }

    #[test]
    fn test_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("embedded.toml");
        std::fs::write(&settings, "server_command = \"/opt/a\"\ntmp_dir = \"scratch\"\n").unwrap();

        let config = resolve_config(&EmbeddedArgs {
            settings: Some(settings),
            server_bin: Some(PathBuf::from("/opt/b")),
            startup_timeout: Some(30),
            ..args()
        })
        .unwrap();

        assert_eq!(config.server_command, PathBuf::from("/opt/b"));
        assert_eq!(config.tmp_dir, PathBuf::from("scratch"));
        assert_eq!(config.startup_timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_failed_launch_removes_storage() {
        let root = tempfile::tempdir().unwrap();
        let tmp = root.path().join("scratch");
        let layout = embedded::prepare_storage(&tmp).unwrap();
        let config = EmbeddedConfig {
            server_command: root.path().join("no-such-cassandra"),
            ..EmbeddedConfig::default()
        };

        let err = start_daemon(&config, Path::new("cassandra.yaml"), &layout).unwrap_err();

        assert!(err.to_string().contains("Unable to start"));
        assert!(!tmp.exists());
    }

    #[test]
    fn test_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_config(&EmbeddedArgs {
            settings: Some(dir.path().join("absent.toml")),
            ..args()
        });
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
