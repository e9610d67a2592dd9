//! # Payroll Report Assembly
//!
//! Monthly payroll with role-based bonuses.
//!
//! ## Bonus Rates
//! ```text
//! ┌──────────────────────────┬────────┐
//! │  Role (any case)         │  Rate  │
//! ├──────────────────────────┼────────┤
//! │  garcom, balconista      │  10 %  │
//! │  seguranca               │  15 %  │
//! │  caixa, faxineiro        │   5 %  │
//! │  anything else           │   0 %  │
//! └──────────────────────────┴────────┘
//! ```
//!
//! An employee counts in every month whose last day is on or after their hire
//! date. Months with nobody in them are still reported.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::filter::QueryParams;
use crate::period::{self, DateRange};
use crate::types::Employee;

/// Bonus rate for `role`, matched case-insensitively.
pub fn bonus_rate(role: &str) -> f64 {
    match role.trim().to_lowercase().as_str() {
        "garcom" | "balconista" => 0.10,
        "seguranca" => 0.15,
        "caixa" | "faxineiro" => 0.05,
        _ => 0.0,
    }
}

/// Longest range, in months, a payroll request may cover.
pub const MAX_PAYROLL_MONTHS: i64 = 240;

// =============================================================================
// Request
// =============================================================================

/// Validated payroll report parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRequest {
    pub range: DateRange,
    pub role: Option<String>,
}

impl PayrollRequest {
    /// Reads `start`, `end` and the optional `tipo` role filter.
    pub fn from_params(params: &QueryParams) -> CoreResult<Self> {
        let range = DateRange::parse(params.get("start"), params.get("end"))?;
        if period::months_between(range.start, range.end) >= MAX_PAYROLL_MONTHS {
            return Err(CoreError::invalid_parameter(
                "end",
                format!("range must cover at most {} months", MAX_PAYROLL_MONTHS),
            ));
        }
        let role = params
            .get("tipo")
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Ok(PayrollRequest { range, role })
    }

    /// First day of every month from `start`'s month through `end`'s month.
    pub fn months(&self) -> Vec<NaiveDate> {
        let first = |d: NaiveDate| d.with_day(1).unwrap_or(d);
        let last = first(self.range.end);
        let mut current = first(self.range.start);
        let mut out = Vec::new();
        while current <= last {
            out.push(current);
            match current.checked_add_months(Months::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }
        out
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// One employee's pay for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayrollEntry {
    pub id: i64,
    pub name: String,
    pub tax_id: String,
    pub role: String,
    pub schedule: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub total_salary: f64,
    #[ts(as = "String")]
    pub hire_date: NaiveDate,
}

impl From<Employee> for PayrollEntry {
    fn from(e: Employee) -> Self {
        let bonus = e.salary * bonus_rate(&e.role);
        PayrollEntry {
            id: e.id,
            name: e.name,
            tax_id: e.cpf,
            role: e.role,
            schedule: e.schedule,
            base_salary: e.salary,
            bonus,
            total_salary: e.salary + bonus,
            hire_date: e.hired_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyPayroll {
    /// English month name (`January`).
    pub month_label: String,
    pub year: i32,
    pub employee_count: usize,
    pub total_base: f64,
    pub total_bonus: f64,
    pub total_payroll: f64,
    pub employees: Vec<PayrollEntry>,
}

impl MonthlyPayroll {
    /// Builds the month starting at `month` from the employees active in it.
    pub fn new(month: NaiveDate, employees: Vec<Employee>) -> Self {
        let employees: Vec<PayrollEntry> = employees.into_iter().map(PayrollEntry::from).collect();
        let total_base: f64 = employees.iter().map(|e| e.base_salary).sum();
        let total_bonus: f64 = employees.iter().map(|e| e.bonus).sum();
        MonthlyPayroll {
            month_label: month.format("%B").to_string(),
            year: month.year(),
            employee_count: employees.len(),
            total_base,
            total_bonus,
            total_payroll: total_base + total_bonus,
            employees,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayrollReport {
    #[ts(as = "String")]
    pub period_start: NaiveDate,
    #[ts(as = "String")]
    pub period_end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_filter: Option<String>,
    pub period_count: usize,
    pub grand_total: f64,
    pub months: Vec<MonthlyPayroll>,
}

/// Wraps computed months into the report.
pub fn assemble(request: &PayrollRequest, months: Vec<MonthlyPayroll>) -> PayrollReport {
    PayrollReport {
        period_start: request.range.start,
        period_end: request.range.end,
        role_filter: request.role.clone(),
        period_count: months.len(),
        grand_total: months.iter().map(|m| m.total_payroll).sum(),
        months,
    }
}
