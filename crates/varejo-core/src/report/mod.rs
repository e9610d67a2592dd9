//! # Reports
//!
//! Pure assembly of the financial, payroll and batch spending reports. The
//! store supplies the raw sums and employee rows; everything else happens
//! here.

pub mod financial;
pub mod payroll;
pub mod spending;

pub use financial::{
    FinancialReport, FinancialRequest, PeriodAmounts, TimeSeriesPoint, Totals,
    MAX_PROJECTION_PERIODS, MAX_SERIES_POINTS,
};
pub use payroll::{
    bonus_rate, MonthlyPayroll, PayrollEntry, PayrollReport, PayrollRequest, MAX_PAYROLL_MONTHS,
};
pub use spending::{MonthlySpending, SpendingByMonth, SpendingRequest};
