//! `cql-demos orm` - Persist `Department` entities through the mapper.

use cql_demos_client::{Cluster, DemoError, DemoResult, Department, Mapper};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::CliResult;
use crate::output;

/// Filtered query mapped back to entities
pub const SELECT_LARGE_DEPARTMENTS: &str =
    "SELECT * FROM demo.departments WHERE head_count > 1000 ALLOW FILTERING";

/// What the walkthrough observed.
#[derive(Debug, Default)]
pub struct OrmReport {
    /// Head count read back after the update
    pub updated_head_count: Option<i32>,
    /// Names of departments found by the filtered query
    pub large_departments: Vec<String>,
}

/// A department that was just saved must be readable again.
fn read_back(found: Option<Department>, id: Uuid) -> DemoResult<Department> {
    found.ok_or_else(|| {
        error!(%id, "Saved department could not be read back");
        DemoError::NotFound(format!("department {id}"))
    })
}

/// Save, load, update and delete departments.
pub async fn walkthrough(cluster: &Cluster) -> CliResult<OrmReport> {
    let mapper = Mapper::<Department>::new(cluster.clone());
    let mut report = OrmReport::default();

    let department = Department::new(
        "HR",
        200,
        vec![
            "Salary management".to_string(),
            "Hiring".to_string(),
            "Complaints".to_string(),
        ],
    );
    debug!(department = %department, "Saving department entity");
    mapper.save(&department).await?;

    let mut retrieved = read_back(mapper.get(department.id).await?, department.id)?;
    info!(department = %retrieved, "Retrieved saved department");

    retrieved.head_count = Some(150);
    mapper.save(&retrieved).await?;

    let updated = read_back(mapper.get(department.id).await?, department.id)?;
    info!(department = %updated, "Retrieved updated department");
    report.updated_head_count = updated.head_count;
    mapper.delete(&updated).await?;

    let others = [
        Department::new("Accounts", 1500, Vec::new()),
        Department::new("Recruitment", 200, Vec::new()),
        Department::new("Marketing", 2300, Vec::new()),
    ];
    for department in &others {
        mapper.save(department).await?;
    }

    let results = cluster.execute(SELECT_LARGE_DEPARTMENTS, &[]).await?;
    for department in mapper.map(results)? {
        info!(department = %department, "Query found department with headcount > 1000");
        report.large_departments.push(department.name);
    }

    for department in &others {
        mapper.delete(department).await?;
    }

    Ok(report)
}

/// Run the orm command
pub async fn run(cluster: Cluster) -> CliResult<()> {
    output::header("Object Mapping");

    let report = walkthrough(&cluster).await?;
    cluster.close();

    if let Some(count) = report.updated_head_count {
        output::kv("Updated head count", &count.to_string());
    }
    output::kv("Large departments", &report.large_departments.join(", "));
    output::success("Mapping walkthrough complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_back_missing_department() {
        let id = Uuid::new_v4();
        let err = read_back(None, id).unwrap_err();
        assert_eq!(err.to_string(), format!("Row not found: department {id}"));
    }

    #[test]
    fn test_read_back_found_department() {
        let hr = Department::new("HR", 200, Vec::new());
        let found = read_back(Some(hr.clone()), hr.id).unwrap();
        assert_eq!(found, hr);
    }
}
