//! # Report Aggregators
//!
//! Runs the store side of the financial, payroll and batch spending reports
//! and hands the raw rows to `varejo_core::report` for assembly.
//!
//! ## Data Source Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  financial_report(source, request)      payroll_report(source, request)│
//! │        │                                       │                        │
//! │        │ revenue ┐ concurrently                │ per month:             │
//! │        │ expense ┘                             │ employees_hired_by     │
//! │        ▼                                       ▼                        │
//! │  ┌──────────────────────── ReportSource ─────────────────────────┐     │
//! │  │  PgReportSource (PostgreSQL)   │   in-memory fake (tests)      │     │
//! │  └────────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any store error aborts the report; no partial report is returned.

mod postgres;

pub use postgres::PgReportSource;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use varejo_core::period::{self, DateRange, Granularity};
use varejo_core::report::{financial, payroll, FinancialReport, FinancialRequest, MonthlyPayroll};
use varejo_core::report::{spending, MonthlySpending, PayrollReport, PayrollRequest};
use varejo_core::report::{SpendingByMonth, SpendingRequest};
use varejo_core::Employee;

use crate::error::DbResult;

/// Rows the report aggregators need from the store.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Sale revenue (`quantidade × valor_unitario`) per bucket start, over
    /// sales dated within `range`.
    async fn revenue(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> DbResult<Vec<(NaiveDateTime, f64)>>;

    /// Batch purchase cost (`preco_unitario × quantidade_inicial`) per bucket
    /// start, over batches supplied within `range`.
    async fn expense(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> DbResult<Vec<(NaiveDateTime, f64)>>;

    /// Employees hired on or before `cutoff`, optionally only those whose
    /// role matches `role` case-insensitively, ordered by name.
    async fn employees_hired_by(
        &self,
        cutoff: NaiveDate,
        role: Option<&str>,
    ) -> DbResult<Vec<Employee>>;

    /// Batch purchase cost and batch count per calendar month of the supply
    /// date, optionally limited to one year.
    async fn batch_spending(&self, year: Option<i32>) -> DbResult<Vec<MonthlySpending>>;
}

/// Builds the financial report.
pub async fn financial_report<S>(source: &S, request: &FinancialRequest) -> DbResult<FinancialReport>
where
    S: ReportSource + ?Sized,
{
    let g = request.granularity;
    let (revenue_rows, expense_rows) =
        tokio::try_join!(source.revenue(request.range, g), source.expense(request.range, g))?;

    debug!(
        granularity = %g,
        revenue_rows = revenue_rows.len(),
        expense_rows = expense_rows.len(),
        "Financial sums loaded"
    );

    let revenue = financial::bucket_amounts(revenue_rows, g);
    let expense = financial::bucket_amounts(expense_rows, g);
    Ok(financial::assemble(request, &revenue, &expense))
}

/// Builds the payroll report, one month at a time.
pub async fn payroll_report<S>(source: &S, request: &PayrollRequest) -> DbResult<PayrollReport>
where
    S: ReportSource + ?Sized,
{
    let role = request.role.as_deref();
    let mut months = Vec::new();

    for month in request.months() {
        let employees = source
            .employees_hired_by(period::month_end(month), role)
            .await?;
        debug!(month = %month, employees = employees.len(), "Payroll month loaded");
        months.push(MonthlyPayroll::new(month, employees));
    }

    Ok(payroll::assemble(request, months))
}

/// Builds the monthly batch spending report.
pub async fn batch_spending_report<S>(
    source: &S,
    request: &SpendingRequest,
) -> DbResult<SpendingByMonth>
where
    S: ReportSource + ?Sized,
{
    let rows = source.batch_spending(request.year).await?;
    debug!(year = ?request.year, rows = rows.len(), "Batch spending loaded");
    Ok(spending::assemble(rows))
}
