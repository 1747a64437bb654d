//! `cql-demos async` - A SELECT whose rows are handled when the query completes.

use cql_demos_client::{Cluster, DemoResult, ResultRows};
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::commands::simple::SELECT_OFFICES;
use crate::error::CliResult;
use crate::output;

fn on_success(rows: &ResultRows) -> DemoResult<usize> {
    for row in rows.iter() {
        let id: Uuid = row.get_by_name("id")?;
        let country: Option<String> = row.get_opt_by_name("country")?;
        let city: Option<String> = row.get_opt_by_name("city")?;
        info!(
            uuid = %id,
            country = country.as_deref().unwrap_or_default(),
            city = city.as_deref().unwrap_or_default(),
            "Asynchronously found office"
        );
    }
    Ok(rows.len())
}

/// Start the query in the background and return immediately.
///
/// Rows are logged from the task once the result arrives; failures are
/// logged there too and also come back through the handle.
pub fn spawn(cluster: Cluster) -> JoinHandle<DemoResult<usize>> {
    tokio::spawn(async move {
        let outcome = match cluster.execute(SELECT_OFFICES, &[]).await {
            Ok(result) => on_success(&ResultRows::new(result)),
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            error!(error = %e, "Error attempting select offices async query");
        }
        outcome
    })
}

/// Run the async command
pub async fn run(cluster: Cluster) -> CliResult<()> {
    output::header("Async Select");

    let pending = spawn(cluster.clone());
    output::info("Query submitted, waiting for completion");
    let found = pending.await??;
    cluster.close();

    output::success(&format!("Found {found} offices"));
    Ok(())
}
