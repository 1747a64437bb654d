//! # cql-demos-client
//!
//! The shared glue behind the `cql-demos` example programs: cluster
//! configuration, session bootstrap, typed row access, a small object
//! mapper, and the `demo` keyspace definition.
//!
//! Everything that talks to the server goes through the `scylla` driver;
//! this crate only decides which statements to send and how to read the
//! rows that come back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cql_demos_client::{Cluster, ClusterConfig, ResultRows};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClusterConfig::builder()
//!         .add_contact_point("127.0.0.1")
//!         .cluster_name("Test Cluster")
//!         .build();
//!
//!     let cluster = Cluster::connect(config).await?;
//!     let rows = ResultRows::new(cluster.execute("SELECT * FROM demo.offices", &[]).await?);
//!     for row in rows.iter() {
//!         let city: String = row.get_by_name("city")?;
//!         println!("{city}");
//!     }
//!     cluster.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use cql_demos_client::ApplicationProperties;
//!
//! let props = ApplicationProperties::parse(r#"
//!     cluster.name = "Test Cluster"
//!     cluster.host.name = "localhost"
//!     cluster.host.port = 9042
//! "#).unwrap();
//! let config = props.into_cluster_config().unwrap();
//! assert_eq!(config.known_nodes(), &["localhost:9042"]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod cluster;
mod config;
mod connection;
mod error;
mod mapper;
mod model;
mod row;
pub mod schema;
mod types;

pub use cluster::{Cluster, ClusterStats};
pub use config::{
    APPLICATION_FILE_NAME, ApplicationProperties, ClusterConfig, ClusterConfigBuilder,
    ClusterProperties, DEFAULT_PORT, HostProperties,
};
pub use error::{DemoError, DemoResult};
pub use mapper::{Entity, Mapper, MapperStatements};
pub use model::Department;
pub use row::{FromCqlValue, ResultRows, RowAccessor};
pub use types::ToCqlValue;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cluster::Cluster;
    pub use crate::config::{ApplicationProperties, ClusterConfig};
    pub use crate::error::{DemoError, DemoResult};
    pub use crate::mapper::{Entity, Mapper};
    pub use crate::model::Department;
    pub use crate::row::{ResultRows, RowAccessor};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClusterConfig::builder()
            .known_nodes(["127.0.0.1:9042"])
            .default_keyspace("demo")
            .build();

        assert_eq!(config.default_keyspace(), Some("demo"));
        assert_eq!(config.known_nodes().len(), 1);
    }

    #[test]
    fn test_department_mapper_statements() {
        let statements = MapperStatements::for_entity::<Department>();
        assert_eq!(
            statements.get,
            "SELECT id, name, created, head_count, capabilities FROM demo.departments WHERE id = ?"
        );
    }
}
