//! `cql-demos setup` - Create the demo keyspace and tables.

use cql_demos_client::{Cluster, schema};

use crate::cli::SetupArgs;
use crate::error::CliResult;
use crate::output;

/// Run the setup command
pub async fn run(cluster: Cluster, args: SetupArgs) -> CliResult<()> {
    output::header("Demo Schema");

    let total = if args.seed { 2 } else { 1 };
    output::step(1, total, "Creating keyspace and tables...");
    schema::create_all(&cluster).await?;

    if args.seed {
        output::step(2, total, "Inserting seed rows...");
        schema::populate(&cluster).await?;
    }

    cluster.close();
    output::newline();
    output::success(&format!("Keyspace '{}' is ready", schema::KEYSPACE));
    Ok(())
}
