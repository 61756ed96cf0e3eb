use serde_json::{Map, Value};

use super::error::FilterError;
use super::types::{FilterData, FilterOp, FilterWhereInfo, SqlResult};

/// A parsed, column-checked predicate over one table.
///
/// The same filter renders to SQL for the Postgres engine and evaluates
/// directly against a row for the in-memory engine.
pub struct Filter {
    table_name: String,
    known_columns: Vec<String>,
    conditions: Vec<FilterWhereInfo>,
    limit: Option<i32>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        if !is_identifier(&table_name) {
            return Err(FilterError::InvalidTableName(table_name));
        }
        Ok(Self {
            table_name,
            known_columns: vec![],
            conditions: vec![],
            limit: None,
        })
    }

    /// Restrict conditions to these columns. Without this, any well-formed identifier is accepted.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(where_clause) = data.where_clause {
            self.where_clause(where_clause)?;
        }
        if let Some(limit) = data.limit {
            if limit < 0 {
                return Err(FilterError::NegativeLimit(limit));
            }
            self.limit = Some(limit);
        }
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        let obj = match conditions {
            Value::Null => return Ok(self),
            Value::Object(obj) => obj,
            Value::Array(_) => return Err(FilterError::InvalidWhereClause("an array")),
            _ => return Err(FilterError::InvalidWhereClause("a scalar")),
        };

        for (column, value) in obj {
            self.validate_column(&column)?;
            match value {
                Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                    for (op, data) in ops {
                        let operator = FilterOp::parse(&op).ok_or(FilterError::UnsupportedOperator(op))?;
                        self.conditions.push(FilterWhereInfo { column: column.clone(), operator, data });
                    }
                }
                data => self.conditions.push(FilterWhereInfo { column, operator: FilterOp::Eq, data }),
            }
        }
        Ok(self)
    }

    /// Render a `SELECT *` ordered by id so "first match" is the lowest id.
    pub fn to_sql(&self) -> SqlResult {
        let mut params = vec![];
        let mut clauses = vec![];
        for condition in &self.conditions {
            if condition.data.is_null() {
                let test = match condition.operator {
                    FilterOp::Eq => "IS NULL",
                    FilterOp::Ne => "IS NOT NULL",
                };
                clauses.push(format!("\"{}\" {}", condition.column, test));
            } else {
                params.push(condition.data.clone());
                clauses.push(format!(
                    "\"{}\" {} ${}",
                    condition.column,
                    condition.operator.to_sql(),
                    params.len()
                ));
            }
        }

        let mut query = format!("SELECT * FROM \"{}\"", self.table_name);
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY \"id\"");
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        SqlResult { query, params }
    }

    /// Evaluate against a row given as `column -> value`. Missing columns compare as null.
    pub fn matches(&self, row: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|condition| {
            let actual = row.get(&condition.column).unwrap_or(&Value::Null);
            let equal = values_equal(actual, &condition.data);
            match condition.operator {
                FilterOp::Eq => equal,
                FilterOp::Ne => !equal,
            }
        })
    }

    fn validate_column(&self, column: &str) -> Result<(), FilterError> {
        if !is_identifier(column) {
            return Err(FilterError::MalformedColumn(column.to_string()));
        }
        if !self.known_columns.is_empty() && !self.known_columns.iter().any(|c| c == column) {
            return Err(FilterError::UnknownColumn {
                table: self.table_name.clone(),
                column: column.to_string(),
            });
        }
        Ok(())
    }
}

// Integers compare by value regardless of how serde_json stored them.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn renders_parameterised_sql() {
        let mut filter = Filter::new("students").unwrap();
        filter
            .assign(FilterData {
                where_clause: Some(json!({ "student_name": "Waqas", "department_id": null })),
                limit: Some(1),
            })
            .unwrap();

        let sql = filter.to_sql();
        assert!(sql.query.starts_with("SELECT * FROM \"students\" WHERE "));
        assert!(sql.query.contains("\"department_id\" IS NULL"));
        assert!(sql.query.contains("\"student_name\" = $1"));
        assert!(sql.query.ends_with(" ORDER BY \"id\" LIMIT 1"));
        assert_eq!(sql.params, vec![json!("Waqas")]);
    }

    #[test]
    fn evaluates_against_rows() {
        let mut filter = Filter::new("students").unwrap();
        filter.where_clause(json!({ "id": { "$ne": 1 }, "address": "Atd" })).unwrap();

        assert!(filter.matches(&row(json!({ "id": 2, "address": "Atd" }))));
        assert!(!filter.matches(&row(json!({ "id": 1, "address": "Atd" }))));
        assert!(!filter.matches(&row(json!({ "id": 2 }))));
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let mut filter = Filter::new("students").unwrap();
        filter.assign(FilterData::eq("student_name", "waqas")).unwrap();
        assert!(!filter.matches(&row(json!({ "student_name": "Waqas" }))));
    }

    #[test]
    fn rejects_unknown_columns_and_operators() {
        let mut filter = Filter::new("students").unwrap().columns(["id", "student_name"]);
        assert!(matches!(
            filter.where_clause(json!({ "password": "x" })),
            Err(FilterError::UnknownColumn { .. })
        ));
        assert!(matches!(
            filter.where_clause(json!({ "id": { "$like": "1%" } })),
            Err(FilterError::UnsupportedOperator(_))
        ));
        assert!(matches!(
            filter.where_clause(json!({ "id; DROP TABLE": 1 })),
            Err(FilterError::MalformedColumn(_))
        ));
        assert!(Filter::new("students\"").is_err());
    }
}
