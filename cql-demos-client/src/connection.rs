//! Session bootstrap.

use scylla::{Session, SessionBuilder};
use tracing::{debug, info};

use crate::config::ClusterConfig;
use crate::error::DemoResult;

/// Open a driver session for the given configuration.
pub(crate) async fn open_session(config: &ClusterConfig) -> DemoResult<Session> {
    let mut builder = SessionBuilder::new()
        .known_nodes(config.known_nodes())
        .connection_timeout(config.connection_timeout());

    if let Some(keyspace) = config.default_keyspace() {
        builder = builder.use_keyspace(keyspace, true);
    }

    if let (Some(username), Some(password)) = (config.username(), config.password()) {
        builder = builder.user(username, password);
    }

    let mut profile = scylla::execution_profile::ExecutionProfile::builder()
        .request_timeout(Some(config.request_timeout()));
    if let Some(dc) = config.local_datacenter() {
        profile = profile.load_balancing_policy(
            scylla::load_balancing::DefaultPolicy::builder()
                .prefer_datacenter(dc.to_string())
                .build(),
        );
    }
    builder = builder.default_execution_profile_handle(profile.build().into_handle());

    if let Some(compression) = config.compression() {
        let compression = match compression.to_lowercase().as_str() {
            "lz4" => Some(scylla::transport::Compression::Lz4),
            "snappy" => Some(scylla::transport::Compression::Snappy),
            _ => None,
        };
        builder = builder.compression(compression);
    }

    debug!(nodes = ?config.known_nodes(), "Opening session");
    let session = builder.build().await?;
    info!(
        cluster = config.cluster_name().unwrap_or("<unnamed>"),
        nodes = ?config.known_nodes(),
        "Connected to cluster"
    );
    Ok(session)
}

/// Check whether a server answers at the configured contact points.
///
/// A fresh session is built for every probe. Failing to reach any host means
/// the server is not up; any other failure (for example a rejected login)
/// still proves that something is listening.
pub async fn probe(config: &ClusterConfig) -> bool {
    match open_session(config).await {
        Ok(_) => true,
        Err(e) if e.is_no_host_available() => {
            debug!(reason = %e, "Probe found no reachable host");
            false
        }
        Err(e) => {
            debug!(error = %e, "Probe reached a host that refused the session");
            true
        }
    }
}
