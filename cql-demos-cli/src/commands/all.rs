//! `cql-demos all` - Run the simple, paging, prepared and async examples
//! against one shared cluster handle.

use std::time::Duration;

use cql_demos_client::Cluster;
use tracing::{info, warn};

use crate::cli::{AllArgs, PagingArgs};
use crate::commands::{async_select, paging, prepared, simple};
use crate::error::CliResult;
use crate::output;

/// Run the all command
pub async fn run(cluster: Cluster, args: AllArgs) -> CliResult<()> {
    output::header("All Examples");

    output::step(1, 4, "Simple select");
    simple::select_offices(&cluster).await?;

    output::step(2, 4, "Paging select");
    let pages = paging::run_pages(&cluster, &PagingArgs::default()).await?;
    info!(pages = pages.len(), "Paged select finished");

    output::step(3, 4, "Prepared statement select");
    prepared::select_offices_in(&cluster, "US").await?;

    output::step(4, 4, "Async select");
    let pending = async_select::spawn(cluster.clone());

    // Outstanding asynchronous work gets a grace period before the cluster closes.
    match tokio::time::timeout(Duration::from_secs(args.grace_secs), pending).await {
        Ok(joined) => {
            joined??;
        }
        Err(_) => warn!(
            grace_secs = args.grace_secs,
            "Async example still running, closing cluster anyway"
        ),
    }

    cluster.close();
    output::newline();
    output::success("All examples finished");
    Ok(())
}
