//! `cql-demos prepared` - A SELECT through a prepared statement with a bound value.

use cql_demos_client::{Cluster, ResultRows};
use tracing::info;
use uuid::Uuid;

use crate::cli::PreparedArgs;
use crate::error::CliResult;
use crate::output;

/// Statement run by this example
pub const SELECT_OFFICES_BY_COUNTRY: &str =
    "SELECT * FROM demo.offices WHERE country = :country ALLOW FILTERING";

/// Find the offices of one country. Returns the number of rows seen.
pub async fn select_offices_in(cluster: &Cluster, country: &str) -> CliResult<usize> {
    let rows = ResultRows::new(
        cluster
            .execute_prepared(SELECT_OFFICES_BY_COUNTRY, (country,))
            .await?,
    );

    for row in rows.iter() {
        let city: Option<String> = row.get_opt_by_name("city")?;
        let id: Uuid = row.get_by_name("id")?;
        info!(
            country,
            city = city.as_deref().unwrap_or_default(),
            uuid = %id,
            "Used prepared statement to find office"
        );
    }

    Ok(rows.len())
}

/// Run the prepared command
pub async fn run(cluster: Cluster, args: PreparedArgs) -> CliResult<()> {
    output::header("Prepared Statement Select");
    output::kv("Country", &args.country);
    output::newline();

    let found = select_offices_in(&cluster, &args.country).await?;
    cluster.close();

    output::success(&format!("Found {found} offices in {}", args.country));
    Ok(())
}
