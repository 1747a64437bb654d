//! The `demo` keyspace: table definitions, seed rows and cleanup.

use futures::StreamExt;
use tracing::{debug, info};

use crate::cluster::Cluster;
use crate::error::{DemoError, DemoResult};

/// Keyspace used by every example.
pub const KEYSPACE: &str = "demo";

/// Keyspace definition, single replica.
pub const CREATE_KEYSPACE: &str = "CREATE KEYSPACE IF NOT EXISTS demo \
     WITH replication = {'class':'SimpleStrategy', 'replication_factor':1}";

/// `demo.offices`
pub const CREATE_OFFICES: &str = "CREATE TABLE IF NOT EXISTS demo.offices (
    id uuid PRIMARY KEY,
    country text,
    city text
)";

/// `demo.employees`
pub const CREATE_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS demo.employees (
    id uuid,
    name text,
    role text,
    PRIMARY KEY (id, name)
)";

/// `demo.departments`, backing the `Department` entity.
pub const CREATE_DEPARTMENTS: &str = "CREATE TABLE IF NOT EXISTS demo.departments (
    id uuid PRIMARY KEY,
    name text,
    created timestamp,
    head_count int,
    capabilities list<text>
)";

/// Seed offices as (country, city).
pub const SEED_OFFICES: &[(&str, &str)] =
    &[("US", "Chicago"), ("US", "Detroit"), ("US", "Washington")];

/// Seed employees as (name, role).
pub const SEED_EMPLOYEES: &[(&str, &str)] = &[
    ("John Doe", "Accountant"),
    ("Jane Doe", "HR"),
    ("James Doe", "Marketing"),
];

/// Create the keyspace and all of its tables.
pub async fn create_all(cluster: &Cluster) -> DemoResult<()> {
    debug!("Creating demo keyspace");
    cluster.execute(CREATE_KEYSPACE, &[]).await?;

    for (table, ddl) in [
        ("offices", CREATE_OFFICES),
        ("employees", CREATE_EMPLOYEES),
        ("departments", CREATE_DEPARTMENTS),
    ] {
        debug!(table, "Creating table");
        cluster.execute(ddl, &[]).await?;
    }

    info!(keyspace = KEYSPACE, "Schema ready");
    Ok(())
}

/// Insert the seed offices and employees. Ids are generated server-side.
pub async fn populate(cluster: &Cluster) -> DemoResult<()> {
    debug!("Populating tables");

    for (country, city) in SEED_OFFICES {
        cluster
            .execute(
                "INSERT INTO demo.offices (id, country, city) VALUES (uuid(), ?, ?)",
                (country, city),
            )
            .await?;
    }

    for (name, role) in SEED_EMPLOYEES {
        cluster
            .execute(
                "INSERT INTO demo.employees (id, name, role) VALUES (uuid(), ?, ?)",
                (name, role),
            )
            .await?;
    }

    Ok(())
}

/// List the tables of a keyspace.
pub async fn tables(cluster: &Cluster, keyspace: &str) -> DemoResult<Vec<String>> {
    let mut rows = cluster
        .session()
        .query_iter(
            "SELECT table_name FROM system_schema.tables WHERE keyspace_name = ?",
            (keyspace,),
        )
        .await?
        .into_typed::<(String,)>();

    let mut names = Vec::new();
    while let Some(row) = rows.next().await {
        let (name,) = row.map_err(|e| DemoError::query(e.to_string()))?;
        names.push(name);
    }
    Ok(names)
}

/// Truncate every table of the `demo` keyspace.
pub async fn truncate_all(cluster: &Cluster) -> DemoResult<Vec<String>> {
    let names = tables(cluster, KEYSPACE).await?;
    for table in &names {
        debug!(table = %table, "Truncating table");
        cluster
            .execute(&truncate_statement(KEYSPACE, table), &[])
            .await?;
    }
    Ok(names)
}

fn truncate_statement(keyspace: &str, table: &str) -> String {
    format!("TRUNCATE {keyspace}.{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_targets_demo_keyspace() {
        for ddl in [CREATE_OFFICES, CREATE_EMPLOYEES, CREATE_DEPARTMENTS] {
            assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS demo."));
        }
        assert!(CREATE_KEYSPACE.contains("'replication_factor':1"));
    }

    #[test]
    fn test_seed_rows() {
        assert_eq!(SEED_OFFICES.len(), 3);
        assert!(SEED_OFFICES.iter().all(|(country, _)| *country == "US"));
        assert_eq!(SEED_EMPLOYEES[1], ("Jane Doe", "HR"));
    }

    #[test]
    fn test_truncate_statement() {
        assert_eq!(truncate_statement("demo", "offices"), "TRUNCATE demo.offices");
    }
}
