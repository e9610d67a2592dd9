//! Binding compiled filter values onto sqlx queries.
//!
//! Values are bound in list order, so `values[i]` fills `$i+1`.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use varejo_core::filter::FilterValue;

/// Builds a `query_as` for `sql` with every value bound in order.
pub fn query_as_with<'q, O>(
    sql: &'q str,
    values: &'q [FilterValue],
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    values
        .iter()
        .fold(sqlx::query_as::<_, O>(sql), |query, value| match value {
            FilterValue::Text(v) => query.bind(v.as_str()),
            FilterValue::Int(v) => query.bind(*v),
            FilterValue::Float(v) => query.bind(*v),
            FilterValue::Date(v) => query.bind(*v),
        })
}
