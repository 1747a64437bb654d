//! `cql-demos simple` - A plain SELECT through an unprepared statement.

use cql_demos_client::{Cluster, ResultRows};
use tracing::info;
use uuid::Uuid;

use crate::error::CliResult;
use crate::output;

/// Statement run by this example
pub const SELECT_OFFICES: &str = "SELECT * FROM demo.offices";

/// Query every office and log it. Returns the number of rows seen.
pub async fn select_offices(cluster: &Cluster) -> CliResult<usize> {
    let rows = ResultRows::new(cluster.execute(SELECT_OFFICES, &[]).await?);

    for row in rows.iter() {
        let id: Uuid = row.get_by_name("id")?;
        let country: Option<String> = row.get_opt_by_name("country")?;
        let city: Option<String> = row.get_opt_by_name("city")?;
        info!(
            uuid = %id,
            country = country.as_deref().unwrap_or_default(),
            city = city.as_deref().unwrap_or_default(),
            "Found office"
        );
    }

    Ok(rows.len())
}

/// Run the simple command
pub async fn run(cluster: Cluster) -> CliResult<()> {
    output::header("Simple Select");
    let found = select_offices(&cluster).await?;
    cluster.close();

    output::success(&format!("Found {found} offices"));
    Ok(())
}
