//! PostgreSQL implementation of [`ReportSource`].
//!
//! The bucket unit is bound as a parameter to `date_trunc`, so no request
//! text reaches the SQL.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use std::time::Duration;
use varejo_core::period::{DateRange, Granularity};
use varejo_core::report::MonthlySpending;
use varejo_core::Employee;

use super::ReportSource;
use crate::deadline::bounded;
use crate::error::DbResult;

const REVENUE_BY_PERIOD: &str = r#"
    SELECT
        date_trunc($3::text, v.data_hora_venda::timestamp) AS period,
        COALESCE(SUM(iv.quantidade * iv.valor_unitario), 0)::float8 AS amount
    FROM Venda v
    JOIN item_venda iv ON iv.id_venda = v.id_venda
    WHERE v.data_hora_venda::date BETWEEN $1 AND $2
    GROUP BY period
    ORDER BY period
"#;

const EXPENSE_BY_PERIOD: &str = r#"
    SELECT
        date_trunc($3::text, l.data_fornecimento::timestamp) AS period,
        COALESCE(SUM(l.preco_unitario * l.quantidade_inicial), 0)::float8 AS amount
    FROM Lote l
    WHERE l.data_fornecimento::date BETWEEN $1 AND $2
    GROUP BY period
    ORDER BY period
"#;

const EMPLOYEES_HIRED_BY: &str = r#"
    SELECT
        id_funcionario::int8, nome, cpf, tipo::text, expediente::text,
        salario::float8, data_contratacao::date
    FROM Funcionario
    WHERE data_contratacao <= $1
      AND ($2::text IS NULL OR LOWER(tipo::text) = LOWER($2::text))
    ORDER BY nome
"#;

const BATCH_SPENDING_BY_MONTH: &str = r#"
    SELECT
        EXTRACT(MONTH FROM l.data_fornecimento)::int4 AS mes,
        COALESCE(SUM(l.preco_unitario * l.quantidade_inicial), 0)::float8 AS total_gasto,
        COUNT(*)::int8 AS lotes_comprados
    FROM Lote l
    WHERE $1::int4 IS NULL OR EXTRACT(YEAR FROM l.data_fornecimento)::int4 = $1::int4
    GROUP BY mes
    ORDER BY mes
"#;

/// Report rows read from PostgreSQL, each query bounded by the deadline.
#[derive(Debug, Clone)]
pub struct PgReportSource {
    pool: PgPool,
    timeout: Duration,
}

impl PgReportSource {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        PgReportSource { pool, timeout }
    }

    async fn sums(
        &self,
        sql: &'static str,
        operation: &'static str,
        range: DateRange,
        granularity: Granularity,
    ) -> DbResult<Vec<(NaiveDateTime, f64)>> {
        bounded(
            self.timeout,
            operation,
            sqlx::query_as::<_, (NaiveDateTime, f64)>(sql)
                .bind(range.start)
                .bind(range.end)
                .bind(granularity.sql_unit())
                .fetch_all(&self.pool),
        )
        .await
    }
}

#[async_trait]
impl ReportSource for PgReportSource {
    async fn revenue(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> DbResult<Vec<(NaiveDateTime, f64)>> {
        self.sums(REVENUE_BY_PERIOD, "report.revenue", range, granularity)
            .await
    }

    async fn expense(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> DbResult<Vec<(NaiveDateTime, f64)>> {
        self.sums(EXPENSE_BY_PERIOD, "report.expense", range, granularity)
            .await
    }

    async fn employees_hired_by(
        &self,
        cutoff: NaiveDate,
        role: Option<&str>,
    ) -> DbResult<Vec<Employee>> {
        bounded(
            self.timeout,
            "report.employees",
            sqlx::query_as::<_, Employee>(EMPLOYEES_HIRED_BY)
                .bind(cutoff)
                .bind(role)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn batch_spending(&self, year: Option<i32>) -> DbResult<Vec<MonthlySpending>> {
        bounded(
            self.timeout,
            "report.batch_spending",
            sqlx::query_as::<_, MonthlySpending>(BATCH_SPENDING_BY_MONTH)
                .bind(year)
                .fetch_all(&self.pool),
        )
        .await
    }
}
