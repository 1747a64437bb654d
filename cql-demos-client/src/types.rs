//! Conversions from Rust values into CQL values for bound statements.

use chrono::{DateTime, Utc};
use scylla::frame::response::result::CqlValue;
use scylla::frame::value::CqlTimestamp;
use uuid::Uuid;

/// Trait for types that can be bound as a CQL value.
pub trait ToCqlValue {
    /// Convert to a CQL value. `None` binds null.
    fn to_cql(&self) -> Option<CqlValue>;
}

impl ToCqlValue for bool {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Boolean(*self))
    }
}

impl ToCqlValue for i32 {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Int(*self))
    }
}

impl ToCqlValue for i64 {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::BigInt(*self))
    }
}

impl ToCqlValue for f64 {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Double(*self))
    }
}

impl ToCqlValue for String {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Text(self.clone()))
    }
}

impl ToCqlValue for str {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Text(self.to_string()))
    }
}

impl ToCqlValue for Uuid {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Uuid(*self))
    }
}

impl ToCqlValue for DateTime<Utc> {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::Timestamp(CqlTimestamp(self.timestamp_millis())))
    }
}

impl<T: ToCqlValue> ToCqlValue for Option<T> {
    fn to_cql(&self) -> Option<CqlValue> {
        self.as_ref().and_then(ToCqlValue::to_cql)
    }
}

// Null elements cannot live inside a CQL collection, so they are skipped.
impl<T: ToCqlValue> ToCqlValue for Vec<T> {
    fn to_cql(&self) -> Option<CqlValue> {
        Some(CqlValue::List(
            self.iter().filter_map(ToCqlValue::to_cql).collect(),
        ))
    }
}
