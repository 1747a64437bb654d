//! Mapped entities used by the example programs.

use chrono::{DateTime, SubsecRound, Utc};
use scylla::frame::response::result::CqlValue;
use uuid::Uuid;

use crate::error::DemoResult;
use crate::mapper::Entity;
use crate::row::RowAccessor;
use crate::types::ToCqlValue;

/// A department, stored in `demo.departments`.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    /// Partition key.
    pub id: Uuid,
    /// Department name.
    pub name: String,
    /// Creation time, millisecond precision.
    pub created: DateTime<Utc>,
    /// Number of employees.
    pub head_count: Option<i32>,
    /// What the department does. Empty lists read back as `None`.
    pub capabilities: Option<Vec<String>>,
}

impl Department {
    /// Create a department with a fresh id, created now.
    pub fn new(name: impl Into<String>, head_count: i32, capabilities: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created: Utc::now().trunc_subsecs(3),
            head_count: Some(head_count),
            capabilities: if capabilities.is_empty() {
                None
            } else {
                Some(capabilities)
            },
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Department{{id={}, name='{}', created={}, headCount=",
            self.id,
            self.name,
            self.created.to_rfc3339()
        )?;
        match self.head_count {
            Some(count) => write!(f, "{count}}}"),
            None => f.write_str("null}"),
        }
    }
}

impl Entity for Department {
    const KEYSPACE: &'static str = "demo";
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "created", "head_count", "capabilities"];
    const PARTITION_KEY: &'static str = "id";

    type Key = Uuid;

    fn bind_values(&self) -> Vec<Option<CqlValue>> {
        vec![
            self.id.to_cql(),
            self.name.to_cql(),
            self.created.to_cql(),
            self.head_count.to_cql(),
            self.capabilities.to_cql(),
        ]
    }

    fn key_value(key: &Uuid) -> Option<CqlValue> {
        key.to_cql()
    }

    fn key(&self) -> &Uuid {
        &self.id
    }

    fn from_row(row: &RowAccessor<'_>) -> DemoResult<Self> {
        Ok(Self {
            id: row.get_by_name("id")?,
            name: row.get_by_name("name")?,
            created: row.get_by_name("created")?,
            head_count: row.get_opt_by_name("head_count")?,
            capabilities: row.get_opt_by_name("capabilities")?,
        })
    }
}
