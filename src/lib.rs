//! # cql-demos
//!
//! Example programs for a CQL database, built on the `scylla` driver.
//!
//! - [`client`] holds the shared glue: configuration, the cluster handle,
//!   row access, the object mapper and the demo schema.
//! - [`cli`] holds the runnable examples behind the `cql-demos` binary and
//!   the embedded server bootstrap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cql_demos::client::{ApplicationProperties, Cluster, Department, Mapper};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationProperties::load("application.toml".as_ref())?
//!         .into_cluster_config()?;
//!     let cluster = Cluster::connect(config).await?;
//!
//!     let mapper = Mapper::<Department>::new(cluster.clone());
//!     let hr = Department::new("HR", 200, vec!["Hiring".into()]);
//!     mapper.save(&hr).await?;
//!     println!("{:?}", mapper.get(hr.id).await?);
//!
//!     cluster.close();
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Configuration, cluster handle, row access, mapping and schema.
pub mod client {
    pub use cql_demos_client::*;
}

/// The example programs and the embedded server bootstrap.
pub mod cli {
    pub use cql_demos_cli::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cql_demos_client::prelude::*;
}
