//! Typed access to result rows.

use scylla::QueryResult;
use scylla::frame::response::result::{CqlValue, Row};

use crate::error::{DemoError, DemoResult};

/// A helper for extracting values from a row, by index or by column name.
pub struct RowAccessor<'a> {
    row: &'a Row,
    columns: Option<&'a [String]>,
}

impl<'a> RowAccessor<'a> {
    /// Create an accessor for a bare row. Only index access is available.
    #[must_use]
    pub fn new(row: &'a Row) -> Self {
        Self { row, columns: None }
    }

    /// Create an accessor that also resolves column names. `columns` holds
    /// the result's column names in row order.
    #[must_use]
    pub fn with_columns(row: &'a Row, columns: &'a [String]) -> Self {
        Self {
            row,
            columns: Some(columns),
        }
    }

    /// Get a value by column index.
    pub fn get<T: FromCqlValue>(&self, index: usize) -> DemoResult<T> {
        self.get_opt(index)?
            .ok_or_else(|| DemoError::deserialization(format!("Column {index} is null")))
    }

    /// Get an optional value by column index.
    pub fn get_opt<T: FromCqlValue>(&self, index: usize) -> DemoResult<Option<T>> {
        match self.row.columns.get(index) {
            Some(Some(value)) => Ok(Some(T::from_cql(value)?)),
            Some(None) => Ok(None),
            None => Err(DemoError::deserialization(format!(
                "Column index {index} out of bounds"
            ))),
        }
    }

    /// Get a value by column name.
    pub fn get_by_name<T: FromCqlValue>(&self, name: &str) -> DemoResult<T> {
        self.get_opt_by_name(name)?
            .ok_or_else(|| DemoError::deserialization(format!("Column '{name}' is null")))
    }

    /// Get an optional value by column name.
    pub fn get_opt_by_name<T: FromCqlValue>(&self, name: &str) -> DemoResult<Option<T>> {
        let index = self.index_of(name)?;
        self.get_opt(index)
    }

    fn index_of(&self, name: &str) -> DemoResult<usize> {
        let columns = self.columns.ok_or_else(|| {
            DemoError::deserialization(format!(
                "Column '{name}' requested on a row without metadata"
            ))
        })?;
        columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| DemoError::deserialization(format!("No column named '{name}'")))
    }

    /// Get the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row.columns.len()
    }

    /// Check if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.columns.is_empty()
    }
}

/// The rows of an unpaged result, with their column names kept alongside.
#[derive(Debug, Default)]
pub struct ResultRows {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultRows {
    /// Take the rows and column names out of a query result. Non-row results
    /// hold no rows.
    #[must_use]
    pub fn new(result: QueryResult) -> Self {
        let columns = result
            .col_specs()
            .iter()
            .map(|spec| spec.name.clone())
            .collect();
        Self::from_parts(columns, result.rows.unwrap_or_default())
    }

    /// Build from column names (in row order) and rows.
    #[must_use]
    pub fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Column names, in row order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate rows as accessors.
    pub fn iter(&self) -> impl Iterator<Item = RowAccessor<'_>> {
        self.rows
            .iter()
            .map(|row| RowAccessor::with_columns(row, &self.columns))
    }

    /// Number of rows in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<QueryResult> for ResultRows {
    fn from(result: QueryResult) -> Self {
        Self::new(result)
    }
}

/// Trait for types that can be extracted from a CQL value.
pub trait FromCqlValue: Sized {
    /// Extract a value from a CQL value.
    fn from_cql(value: &CqlValue) -> DemoResult<Self>;
}

impl FromCqlValue for bool {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Boolean(v) => Ok(*v),
            _ => Err(DemoError::type_conversion("Expected boolean")),
        }
    }
}

impl FromCqlValue for i32 {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Int(v) => Ok(*v),
            _ => Err(DemoError::type_conversion("Expected int")),
        }
    }
}

impl FromCqlValue for i64 {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::BigInt(v) => Ok(*v),
            CqlValue::Counter(v) => Ok(v.0),
            _ => Err(DemoError::type_conversion("Expected bigint")),
        }
    }
}

impl FromCqlValue for f64 {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Double(v) => Ok(*v),
            CqlValue::Float(v) => Ok(f64::from(*v)),
            _ => Err(DemoError::type_conversion("Expected double")),
        }
    }
}

impl FromCqlValue for String {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Text(v) | CqlValue::Ascii(v) => Ok(v.clone()),
            _ => Err(DemoError::type_conversion("Expected text")),
        }
    }
}

impl FromCqlValue for Vec<u8> {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Blob(v) => Ok(v.clone()),
            _ => Err(DemoError::type_conversion("Expected blob")),
        }
    }
}

impl FromCqlValue for uuid::Uuid {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Uuid(v) => Ok(*v),
            CqlValue::Timeuuid(v) => Ok((*v).into()),
            _ => Err(DemoError::type_conversion("Expected uuid")),
        }
    }
}

impl FromCqlValue for chrono::DateTime<chrono::Utc> {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Timestamp(ts) => chrono::DateTime::from_timestamp_millis(ts.0)
                .ok_or_else(|| DemoError::type_conversion("Invalid timestamp")),
            _ => Err(DemoError::type_conversion("Expected timestamp")),
        }
    }
}

impl<T: FromCqlValue> FromCqlValue for Option<T> {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::Empty => Ok(None),
            _ => Ok(Some(T::from_cql(value)?)),
        }
    }
}

impl<T: FromCqlValue> FromCqlValue for Vec<T> {
    fn from_cql(value: &CqlValue) -> DemoResult<Self> {
        match value {
            CqlValue::List(items) | CqlValue::Set(items) => {
                items.iter().map(|v| T::from_cql(v)).collect()
            }
            _ => Err(DemoError::type_conversion("Expected list or set")),
        }
    }
}
