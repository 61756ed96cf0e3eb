use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{postgres::PgRow, FromRow};
use validator::Validate;

use crate::database::manager::DatabaseError;
use crate::database::models::Student;
use crate::filter::FilterData;

/// A typed column value written by create/update.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    Text(Option<String>),
    Timestamp(NaiveDateTime),
}

/// A table-backed record with an integer primary key named `id`.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + Validate + Clone + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Every column, `id` first. The rest are in the order `values()` returns them.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);

    /// Values for `COLUMNS[1..]`.
    fn values(&self) -> Vec<SqlValue>;

    fn writable_columns() -> &'static [&'static str] {
        &Self::COLUMNS[1..]
    }

    /// The record as `column -> value`, for in-process filter evaluation.
    fn row(&self) -> Result<Map<String, Value>, DatabaseError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(DatabaseError::QueryError(format!("{} row is not an object", Self::TABLE))),
            Err(e) => Err(DatabaseError::QueryError(e.to_string())),
        }
    }
}

/// Generic data access over one entity type.
///
/// `no_tracking` tells a change-tracking store that the returned instance will not be
/// written back through it. Neither engine here tracks instances, so both accept and ignore it.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, DatabaseError>;

    /// First match in id order.
    async fn get_by_filter(&self, filter: FilterData, no_tracking: bool) -> Result<Option<T>, DatabaseError>;

    /// Insert and return the record with its assigned id. The incoming id is ignored.
    async fn create(&self, record: T) -> Result<T, DatabaseError>;

    /// Overwrite every column of the row with the record's id.
    async fn update(&self, record: T) -> Result<T, DatabaseError>;

    async fn delete(&self, record: T) -> Result<bool, DatabaseError>;
}

/// Student lookups layered on the generic filter query.
#[async_trait]
pub trait StudentRepository: Repository<Student> {
    async fn get_by_id(&self, id: i32, no_tracking: bool) -> Result<Option<Student>, DatabaseError> {
        self.get_by_filter(FilterData::eq("id", id), no_tracking).await
    }

    /// Names are not unique; this returns the lowest-id exact (case-sensitive) match.
    async fn get_by_name(&self, name: &str) -> Result<Option<Student>, DatabaseError> {
        self.get_by_filter(FilterData::eq("student_name", name), false).await
    }
}

impl<R: Repository<Student> + ?Sized> StudentRepository for R {}

/// Entity-level constraints, checked by both engines before a write.
pub(crate) fn check_constraints<T: Entity>(record: &T) -> Result<(), DatabaseError> {
    record.validate().map_err(|errors| {
        let (field, errs) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| (field.to_string(), errs.clone()))
            .unwrap_or_else(|| ("record".to_string(), vec![]));
        let message = errs
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect::<Vec<_>>()
            .join("; ");
        DatabaseError::Constraint { field, message }
    })
}
