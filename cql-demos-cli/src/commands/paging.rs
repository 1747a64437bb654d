//! `cql-demos paging` - Read a result one page at a time, resuming from a
//! saved paging state.

use std::ops::ControlFlow;

use cql_demos_client::{Cluster, DemoError, ResultRows};
use scylla::prepared_statement::PreparedStatement;
use scylla::statement::{PagingState, PagingStateResponse};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cli::PagingArgs;
use crate::error::CliResult;
use crate::output;

/// Insert statement for the generated employees
pub const INSERT_EMPLOYEE: &str =
    "INSERT INTO demo.employees(id, name, role) VALUES(:id, :name, :role)";

/// Paged select
pub const SELECT_EMPLOYEES: &str = "SELECT id, name, role FROM demo.employees";

/// One page of the employee query.
#[derive(Debug)]
pub struct Page {
    /// Rows on this page
    pub rows: usize,
    /// State to resume from, `None` once the result is exhausted
    pub next: Option<PagingState>,
}

/// Reads `demo.employees` page by page.
pub struct PagingSelect {
    cluster: Cluster,
    fetch_size: i32,
    select: Option<PreparedStatement>,
}

impl PagingSelect {
    /// Create the example over a cluster handle.
    pub fn new(cluster: Cluster, fetch_size: i32) -> Self {
        Self {
            cluster,
            fetch_size: fetch_size.max(1),
            select: None,
        }
    }

    /// Insert `count` generated employees, then read the first page.
    pub async fn run(&mut self, count: usize) -> CliResult<Page> {
        self.insert_employee_data(count).await?;
        self.query_employees_paged(None).await
    }

    /// Insert `count` employees named `employee N` with role `role N`.
    pub async fn insert_employee_data(&self, count: usize) -> CliResult<()> {
        let insert = self.cluster.prepare(INSERT_EMPLOYEE).await?;

        for i in 0..count {
            self.cluster
                .session()
                .execute_unpaged(
                    &insert,
                    (Uuid::new_v4(), format!("employee {i}"), format!("role {i}")),
                )
                .await
                .map_err(DemoError::from)?;
            debug!(employee = i, "Inserted employee");
        }

        Ok(())
    }

    /// Read one page. Without a state the query starts from the first page.
    pub async fn query_employees_paged(&mut self, state: Option<PagingState>) -> CliResult<Page> {
        let select = match &self.select {
            Some(select) => select.clone(),
            None => {
                let mut select = self.cluster.prepare(SELECT_EMPLOYEES).await?;
                select.set_page_size(self.fetch_size);
                self.select = Some(select.clone());
                select
            }
        };

        let (result, response) = self
            .cluster
            .session()
            .execute_single_page(&select, &[], start_from(state))
            .await
            .map_err(DemoError::from)?;

        let rows = ResultRows::new(result);
        for row in rows.iter() {
            let id: Uuid = row.get_by_name("id")?;
            let name: String = row.get_by_name("name")?;
            let role: Option<String> = row.get_opt_by_name("role")?;
            debug!(
                id = %id,
                name = %name,
                role = role.as_deref().unwrap_or_default(),
                "Paged query returned employee"
            );
        }

        let next = next_state(response);

        Ok(Page {
            rows: rows.len(),
            next,
        })
    }
}

/// A missing state means the first page.
fn start_from(state: Option<PagingState>) -> PagingState {
    state.unwrap_or_else(PagingState::start)
}

/// State for the following page, `None` once the result is exhausted.
fn next_state(response: PagingStateResponse) -> Option<PagingState> {
    match response.into_paging_control_flow() {
        ControlFlow::Continue(next) => Some(next),
        ControlFlow::Break(()) => None,
    }
}

/// Insert the employees, then read up to `args.pages` pages.
pub async fn run_pages(cluster: &Cluster, args: &PagingArgs) -> CliResult<Vec<usize>> {
    let mut example = PagingSelect::new(cluster.clone(), args.fetch_size);
    let mut page = example.run(args.rows).await?;
    let mut sizes = vec![page.rows];

    for number in 2..=args.pages {
        let Some(state) = page.next.take() else {
            info!("No pages remain");
            break;
        };
        info!(page = number, "Retrieving page");
        page = example.query_employees_paged(Some(state)).await?;
        sizes.push(page.rows);
    }

    Ok(sizes)
}

/// Run the paging command
pub async fn run(cluster: Cluster, args: PagingArgs) -> CliResult<()> {
    output::header("Paging Select");
    output::kv("Rows inserted", &args.rows.to_string());
    output::kv("Fetch size", &args.fetch_size.to_string());
    output::newline();

    let sizes = run_pages(&cluster, &args).await?;
    cluster.close();

    for (index, rows) in sizes.iter().enumerate() {
        output::step(index + 1, sizes.len(), &format!("page with {rows} rows"));
    }
    output::success(&format!("Read {} pages", sizes.len()));
    Ok(())
}
