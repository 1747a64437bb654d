//! Object mapping between entity structs and CQL tables.
//!
//! An [`Entity`] names its table, its columns and its partition key, and
//! knows how to turn itself into bind values and back from a row. A
//! [`Mapper`] turns that description into the four statements the example
//! programs need: save (an upsert), get by key, delete, and mapping of an
//! arbitrary result back to entities.
//!
//! ```rust,no_run
//! use cql_demos_client::{Cluster, Department, Mapper};
//!
//! # async fn demo(cluster: Cluster) -> cql_demos_client::DemoResult<()> {
//! let mapper = Mapper::<Department>::new(cluster);
//! let hr = Department::new("HR", 200, vec!["Hiring".into()]);
//! mapper.save(&hr).await?;
//! let found = mapper.get(hr.id).await?;
//! # Ok(())
//! # }
//! ```

use scylla::QueryResult;
use scylla::frame::response::result::CqlValue;
use std::marker::PhantomData;
use tracing::debug;

use crate::cluster::Cluster;
use crate::error::{DemoError, DemoResult};
use crate::row::{ResultRows, RowAccessor};

/// A struct persisted as one row of a CQL table.
pub trait Entity: Sized {
    /// Keyspace holding the table.
    const KEYSPACE: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// All mapped columns, partition key first.
    const COLUMNS: &'static [&'static str];
    /// The partition key column.
    const PARTITION_KEY: &'static str;

    /// Partition key type.
    type Key;

    /// Values for [`Self::COLUMNS`], in the same order. `None` binds null.
    fn bind_values(&self) -> Vec<Option<CqlValue>>;

    /// Bind value for a partition key.
    fn key_value(key: &Self::Key) -> Option<CqlValue>;

    /// This entity's partition key.
    fn key(&self) -> &Self::Key;

    /// Build the entity from a row. Columns are looked up by name.
    fn from_row(row: &RowAccessor<'_>) -> DemoResult<Self>;
}

/// The statements a [`Mapper`] runs for an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperStatements {
    /// Upsert of every column.
    pub save: String,
    /// Select of every column by partition key.
    pub get: String,
    /// Delete by partition key.
    pub delete: String,
}

impl MapperStatements {
    /// Generate the statements for `E`.
    #[must_use]
    pub fn for_entity<E: Entity>() -> Self {
        let table = format!("{}.{}", E::KEYSPACE, E::TABLE);
        let columns = E::COLUMNS.join(", ");
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");

        Self {
            save: format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})"),
            get: format!(
                "SELECT {columns} FROM {table} WHERE {} = ?",
                E::PARTITION_KEY
            ),
            delete: format!("DELETE FROM {table} WHERE {} = ?", E::PARTITION_KEY),
        }
    }
}

/// Saves, loads and deletes entities of type `E`.
pub struct Mapper<E> {
    cluster: Cluster,
    statements: MapperStatements,
    _marker: PhantomData<E>,
}

impl<E: Entity> Mapper<E> {
    /// Create a mapper over a cluster handle.
    #[must_use]
    pub fn new(cluster: Cluster) -> Self {
        Self {
            cluster,
            statements: MapperStatements::for_entity::<E>(),
            _marker: PhantomData,
        }
    }

    /// The statements this mapper runs.
    #[must_use]
    pub fn statements(&self) -> &MapperStatements {
        &self.statements
    }

    /// Insert or overwrite the row for `entity`.
    pub async fn save(&self, entity: &E) -> DemoResult<()> {
        debug!(table = E::TABLE, "Saving entity");
        self.cluster
            .execute_prepared(&self.statements.save, entity.bind_values())
            .await?;
        Ok(())
    }

    /// Load the entity with the given partition key.
    pub async fn get(&self, key: E::Key) -> DemoResult<Option<E>> {
        let result = self
            .cluster
            .execute_prepared(&self.statements.get, vec![E::key_value(&key)])
            .await?;

        let mut found = self.map(result)?;
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            _ => Err(DemoError::MultipleRowsReturned),
        }
    }

    /// Delete the row for `entity`.
    pub async fn delete(&self, entity: &E) -> DemoResult<()> {
        debug!(table = E::TABLE, "Deleting entity");
        self.cluster
            .execute_prepared(&self.statements.delete, vec![E::key_value(entity.key())])
            .await?;
        Ok(())
    }

    /// Map every row of a result to an entity.
    ///
    /// The result must contain all mapped columns; their order does not matter,
    /// so `SELECT *` results are fine.
    pub fn map(&self, result: QueryResult) -> DemoResult<Vec<E>> {
        Self::map_rows(&ResultRows::new(result))
    }

    /// Map rows that were already taken out of a result.
    pub fn map_rows(rows: &ResultRows) -> DemoResult<Vec<E>> {
        rows.iter().map(|row| E::from_row(&row)).collect()
    }
}

impl<E> std::fmt::Debug for Mapper<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("statements", &self.statements)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Office;

    impl Entity for Office {
        const KEYSPACE: &'static str = "demo";
        const TABLE: &'static str = "offices";
        const COLUMNS: &'static [&'static str] = &["id", "country", "city"];
        const PARTITION_KEY: &'static str = "id";

        type Key = i32;

        fn bind_values(&self) -> Vec<Option<CqlValue>> {
            Vec::new()
        }

        fn key_value(key: &i32) -> Option<CqlValue> {
            Some(CqlValue::Int(*key))
        }

        fn key(&self) -> &i32 {
            &0
        }

        fn from_row(_row: &RowAccessor<'_>) -> DemoResult<Self> {
            Ok(Office)
        }
    }

    #[test]
    fn test_statements() {
        let statements = MapperStatements::for_entity::<Office>();
        assert_eq!(
            statements.save,
            "INSERT INTO demo.offices (id, country, city) VALUES (?, ?, ?)"
        );
        assert_eq!(
            statements.get,
            "SELECT id, country, city FROM demo.offices WHERE id = ?"
        );
        assert_eq!(statements.delete, "DELETE FROM demo.offices WHERE id = ?");
    }
}
