use thiserror::Error;

/// Why a lookup filter could not be built. All of these are caller bugs, never user input.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("'{0}' is not a usable table name")]
    InvalidTableName(String),

    #[error("'{0}' is not a usable column name")]
    MalformedColumn(String),

    #[error("table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("where clause must be a JSON object, got {0}")]
    InvalidWhereClause(&'static str),

    #[error("unsupported comparison '{0}' (expected $eq or $ne)")]
    UnsupportedOperator(String),

    #[error("limit must be non-negative, got {0}")]
    NegativeLimit(i32),
}
