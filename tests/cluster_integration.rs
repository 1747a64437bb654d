//! Integration tests against a running server.
//!
//! Ignored by default. Start a node on localhost (or point `CQL_DEMOS_URL`
//! at one) and run with `cargo test -- --ignored`.

use cql_demos::cli::cli::PagingArgs;
use cql_demos::cli::commands::{async_select, orm, paging, prepared, simple};
use cql_demos::client::{Cluster, ClusterConfig, schema};

async fn live_cluster() -> Cluster {
    let url = std::env::var("CQL_DEMOS_URL")
        .unwrap_or_else(|_| "cassandra://localhost:9042".to_string());
    let config = ClusterConfig::from_url(&url).expect("Invalid CQL_DEMOS_URL");
    let cluster = Cluster::connect(config).await.expect("No server reachable");
    schema::create_all(&cluster).await.unwrap();
    cluster
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_selects_after_seeding() {
    let cluster = live_cluster().await;
    schema::truncate_all(&cluster).await.unwrap();
    schema::populate(&cluster).await.unwrap();

    assert_eq!(simple::select_offices(&cluster).await.unwrap(), 3);
    assert_eq!(prepared::select_offices_in(&cluster, "US").await.unwrap(), 3);
    assert_eq!(prepared::select_offices_in(&cluster, "FR").await.unwrap(), 0);
    // Both lookups share one prepared statement.
    assert_eq!(cluster.stats().cached_statements, 1);
    assert_eq!(async_select::spawn(cluster.clone()).await.unwrap().unwrap(), 3);

    let tables = schema::tables(&cluster, schema::KEYSPACE).await.unwrap();
    assert!(tables.contains(&"offices".to_string()));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_paging_reads_full_pages() {
    let cluster = live_cluster().await;
    schema::truncate_all(&cluster).await.unwrap();

    let sizes = paging::run_pages(&cluster, &PagingArgs::default()).await.unwrap();
    assert_eq!(sizes, vec![10, 10]);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_orm_walkthrough() {
    let cluster = live_cluster().await;
    schema::truncate_all(&cluster).await.unwrap();

    let report = orm::walkthrough(&cluster).await.unwrap();
    assert_eq!(report.updated_head_count, Some(150));

    let mut names = report.large_departments;
    names.sort();
    assert_eq!(names, vec!["Accounts".to_string(), "Marketing".to_string()]);
}
