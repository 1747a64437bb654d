//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

/// cql-demos - Example programs for a CQL database
#[derive(Parser, Debug)]
#[command(name = "cql-demos")]
#[command(version)]
#[command(about = "cql-demos - Example programs for a CQL database", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file with the cluster.* connection keys
    #[arg(short, long, global = true, env = "CQL_DEMOS_CONFIG", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, pretty, compact)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the demo keyspace and its tables
    Setup(SetupArgs),

    /// Run a plain SELECT against the offices table
    Simple,

    /// Insert employees and read them back one page at a time
    Paging(PagingArgs),

    /// Run a SELECT through a prepared statement
    Prepared(PreparedArgs),

    /// Run a SELECT asynchronously and log from the completion handler
    Async,

    /// Save, load, update and delete mapped Department entities
    Orm,

    /// Run the simple, paging, prepared and async examples in sequence
    All(AllArgs),

    /// Start a local server, run a smoke test against it, then stop it
    Embedded(EmbeddedArgs),

    /// Display version information
    Version,
}

/// Arguments for the `setup` command
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Also insert the seed offices and employees
    #[arg(long)]
    pub seed: bool,
}

/// Arguments for the `paging` command
#[derive(Args, Debug, Clone)]
pub struct PagingArgs {
    /// Number of employees to insert before querying
    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub fetch_size: i32,

    /// Number of pages to read
    #[arg(long, default_value_t = 2)]
    pub pages: usize,
}

impl Default for PagingArgs {
    fn default() -> Self {
        Self {
            rows: 100,
            fetch_size: 10,
            pages: 2,
        }
    }
}

/// Arguments for the `prepared` command
#[derive(Args, Debug)]
pub struct PreparedArgs {
    /// Country to bind into the statement
    #[arg(long, default_value = "US")]
    pub country: String,
}

/// Arguments for the `all` command
#[derive(Args, Debug)]
pub struct AllArgs {
    /// Seconds to wait for asynchronous examples before closing the cluster
    #[arg(long, default_value_t = 10)]
    pub grace_secs: u64,
}

/// Arguments for the `embedded` command
#[derive(Args, Debug)]
pub struct EmbeddedArgs {
    /// Embedded server settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Server launcher executable
    #[arg(long, env = "CQL_DEMOS_SERVER_BIN")]
    pub server_bin: Option<PathBuf>,

    /// Server configuration file (cassandra.yaml)
    #[arg(long)]
    pub server_config: Option<PathBuf>,

    /// Scratch directory for server data
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,

    /// Seconds to wait for the server to become reachable
    #[arg(long)]
    pub startup_timeout: Option<u64>,
}
