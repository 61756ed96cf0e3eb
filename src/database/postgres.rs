use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgArguments, PgPool, Postgres, QueryBuilder};

use crate::config::IdStrategy;
use crate::database::manager::DatabaseError;
use crate::database::repository::{check_constraints, Entity, Repository, SqlValue};
use crate::filter::{Filter, FilterData};

/// Repository over a Postgres table.
pub struct PgRepository<T> {
    pool: PgPool,
    id_strategy: IdStrategy,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> PgRepository<T> {
    pub fn new(pool: PgPool, id_strategy: IdStrategy) -> Self {
        Self {
            pool,
            id_strategy,
            _phantom: std::marker::PhantomData,
        }
    }

    fn column_list(columns: &[&str]) -> String {
        columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
    }

    fn insert_query(id_strategy: IdStrategy, record: &T) -> QueryBuilder<'static, Postgres> {
        let writable = T::writable_columns();
        let mut qb = QueryBuilder::new(format!("INSERT INTO \"{}\" (", T::TABLE));

        match id_strategy {
            IdStrategy::StoreGenerated => {
                qb.push(Self::column_list(writable));
                qb.push(") VALUES (");
                push_values(&mut qb, record.values());
                qb.push(")");
            }
            IdStrategy::MaxPlusOne => {
                qb.push("\"id\", ");
                qb.push(Self::column_list(writable));
                qb.push(") SELECT COALESCE(MAX(\"id\"), 0) + 1, ");
                push_values(&mut qb, record.values());
                qb.push(format!(" FROM \"{}\"", T::TABLE));
            }
        }

        qb.push(" RETURNING *");
        qb
    }

    fn update_query(record: &T) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("UPDATE \"{}\" SET ", T::TABLE));
        for (i, (column, value)) in T::writable_columns().iter().zip(record.values()).enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format!("\"{}\" = ", column));
            push_bind_value(&mut qb, value);
        }
        qb.push(" WHERE \"id\" = ");
        qb.push_bind(record.id());
        qb.push(" RETURNING *");
        qb
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" ORDER BY \"id\"", T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_filter(&self, filter_data: FilterData, no_tracking: bool) -> Result<Option<T>, DatabaseError> {
        tracing::trace!(table = T::TABLE, no_tracking, "filtered lookup");

        let mut filter = Filter::new(T::TABLE)?.columns(T::COLUMNS.iter().copied());
        filter.assign(FilterData {
            limit: filter_data.limit.or(Some(1)),
            ..filter_data
        })?;

        let sql = filter.to_sql();
        let mut q = sqlx::query_as::<_, T>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn create(&self, record: T) -> Result<T, DatabaseError> {
        check_constraints(&record)?;
        let mut qb = Self::insert_query(self.id_strategy, &record);
        let created = qb.build_query_as::<T>().fetch_one(&self.pool).await?;
        Ok(created)
    }

    async fn update(&self, record: T) -> Result<T, DatabaseError> {
        check_constraints(&record)?;
        let mut qb = Self::update_query(&record);
        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} row {} not found", T::TABLE, record.id())))
    }

    async fn delete(&self, record: T) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(record.id()).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_values(qb: &mut QueryBuilder<'static, Postgres>, values: Vec<SqlValue>) {
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_bind_value(qb, value);
    }
}

fn push_bind_value(qb: &mut QueryBuilder<'static, Postgres>, value: SqlValue) {
    match value {
        SqlValue::Int(v) => {
            qb.push_bind(v);
        }
        SqlValue::Text(v) => {
            qb.push_bind(v);
        }
        SqlValue::Timestamp(v) => {
            qb.push_bind(v);
        }
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
