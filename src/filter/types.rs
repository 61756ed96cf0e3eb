use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "$eq")] Eq,
    #[serde(rename = "$ne")] Ne,
}

impl FilterOp {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "$eq" => Some(FilterOp::Eq),
            "$ne" | "$neq" => Some(FilterOp::Ne),
            _ => None,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
        }
    }
}

/// Predicate handed to a repository lookup.
///
/// `where_clause` is a JSON object of `column -> value` (implicit `$eq`) or
/// `column -> { "$eq" | "$ne": value }`. All conditions are AND-ed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterData {
    pub where_clause: Option<Value>,
    pub limit: Option<i32>,
}

impl FilterData {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        let mut conditions = Map::new();
        conditions.insert(column.to_string(), value.into());
        Self {
            where_clause: Some(Value::Object(conditions)),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub column: String,
    pub operator: FilterOp,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
