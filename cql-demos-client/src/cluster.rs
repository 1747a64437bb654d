//! Shared cluster handle.
//!
//! The driver session already pools connections to every node and
//! reconnects on its own. `Cluster` wraps it so the example programs can
//! share one handle, reuse prepared statements, and close it explicitly.

use parking_lot::RwLock;
use scylla::prepared_statement::PreparedStatement;
use scylla::serialize::row::SerializeRow;
use scylla::{QueryResult, Session};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ClusterConfig;
use crate::connection::{open_session, probe};
use crate::error::{DemoError, DemoResult};

/// A cheaply cloneable handle to a connected cluster.
#[derive(Clone)]
pub struct Cluster {
    session: Arc<Session>,
    config: Arc<ClusterConfig>,
    prepared_cache: Arc<RwLock<HashMap<String, PreparedStatement>>>,
}

impl Cluster {
    /// Connect to the cluster described by `config`.
    pub async fn connect(config: ClusterConfig) -> DemoResult<Self> {
        let session = open_session(&config).await?;

        Ok(Self {
            session: Arc::new(session),
            config: Arc::new(config),
            prepared_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Check whether a server answers at the configured contact points.
    pub async fn probe(config: &ClusterConfig) -> bool {
        probe(config).await
    }

    /// Get a reference to the underlying session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a simple (unprepared) statement and wait for the whole result.
    pub async fn execute(
        &self,
        cql: &str,
        values: impl SerializeRow,
    ) -> DemoResult<QueryResult> {
        self.session
            .query_unpaged(cql, values)
            .await
            .map_err(Into::into)
    }

    /// Prepare a statement, reusing a previously prepared one for the same text.
    pub async fn prepare(&self, cql: &str) -> DemoResult<PreparedStatement> {
        {
            let cache = self.prepared_cache.read();
            if let Some(stmt) = cache.get(cql) {
                return Ok(stmt.clone());
            }
        }

        debug!(cql, "Preparing statement");
        let stmt = self
            .session
            .prepare(cql)
            .await
            .map_err(|e| match DemoError::from(e) {
                DemoError::Query(msg) => DemoError::PreparedStatement(msg),
                other => other,
            })?;
        self.prepared_cache
            .write()
            .insert(cql.to_string(), stmt.clone());

        Ok(stmt)
    }

    /// Prepare (cached) and execute a statement.
    pub async fn execute_prepared(
        &self,
        cql: &str,
        values: impl SerializeRow,
    ) -> DemoResult<QueryResult> {
        let prepared = self.prepare(cql).await?;
        self.session
            .execute_unpaged(&prepared, values)
            .await
            .map_err(Into::into)
    }

    /// Get handle statistics.
    #[must_use]
    pub fn stats(&self) -> ClusterStats {
        ClusterStats {
            cached_statements: self.prepared_cache.read().len(),
            known_nodes: self.config.known_nodes().len(),
            handles: Arc::strong_count(&self.session),
        }
    }

    /// Release this handle. The session shuts down once the last clone is gone.
    pub fn close(self) {
        let stats = self.stats();
        info!(
            cluster = self.config.cluster_name().unwrap_or("<unnamed>"),
            nodes = stats.known_nodes,
            cached_statements = stats.cached_statements,
            remaining_handles = stats.handles - 1,
            "Closing cluster handle"
        );
    }
}

impl std::fmt::Debug for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cluster")
            .field("name", &self.config.cluster_name())
            .field("keyspace", &self.config.default_keyspace())
            .field("nodes", &self.config.known_nodes())
            .field("cached_statements", &self.prepared_cache.read().len())
            .finish()
    }
}

/// Statistics about a cluster handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStats {
    /// Number of cached prepared statements.
    pub cached_statements: usize,
    /// Number of known nodes in the cluster.
    pub known_nodes: usize,
    /// Number of live clones of this handle.
    pub handles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_unreachable() {
        let config = ClusterConfig::builder()
            .add_contact_point_with_port("127.0.0.1", 1)
            .connection_timeout_secs(1)
            .build();

        let err = Cluster::connect(config).await.unwrap_err();
        assert!(err.is_no_host_available());
    }
}
