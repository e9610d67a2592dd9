//! # Batch Spending Report
//!
//! Purchase cost of received batches, grouped by calendar month of the
//! supply date. Without `ano` every year is folded into the same twelve
//! months.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::filter::{parse_unsigned, QueryParams};

/// Spending in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MonthlySpending {
    /// 1 = January.
    #[serde(rename = "mes")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "mes"))]
    pub month: i32,
    #[serde(rename = "total_gasto")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "total_gasto"))]
    pub total_spent: f64,
    #[serde(rename = "lotes_comprados")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "lotes_comprados"))]
    pub batches_bought: i64,
}

/// Report body, keyed by month number.
pub type SpendingByMonth = BTreeMap<u32, MonthlySpending>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpendingRequest {
    pub year: Option<i32>,
}

impl SpendingRequest {
    /// Reads the optional `ano` filter.
    pub fn from_params(params: &QueryParams) -> CoreResult<Self> {
        let year = params
            .get("ano")
            .map(|raw| {
                parse_unsigned(raw)
                    .filter(|y| (1..=9999).contains(y))
                    .map(|y| y as i32)
                    .ok_or_else(|| CoreError::invalid_parameter("ano", "must be a year between 1 and 9999"))
            })
            .transpose()?;
        Ok(SpendingRequest { year })
    }
}

/// Folds store rows into one entry per month, merging repeated months.
pub fn assemble<I>(rows: I) -> SpendingByMonth
where
    I: IntoIterator<Item = MonthlySpending>,
{
    let mut out = SpendingByMonth::new();
    for row in rows {
        let Some(key) = u32::try_from(row.month).ok().filter(|m| (1..=12).contains(m)) else {
            continue;
        };
        out.entry(key)
            .and_modify(|m| {
                m.total_spent += row.total_spent;
                m.batches_bought += row.batches_bought;
            })
            .or_insert(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: i32, total_spent: f64, batches_bought: i64) -> MonthlySpending {
        MonthlySpending {
            month,
            total_spent,
            batches_bought,
        }
    }

    #[test]
    fn test_year_filter() {
        let parse = |pairs: &[(&str, &str)]| {
            SpendingRequest::from_params(&QueryParams::from_pairs(pairs.iter().copied()))
        };
        assert_eq!(parse(&[]).unwrap().year, None);
        assert_eq!(parse(&[("ano", "")]).unwrap().year, None);
        assert_eq!(parse(&[("ano", "2024")]).unwrap().year, Some(2024));

        for raw in ["0", "10000", "-2024", "+2024", "dois mil"] {
            assert!(
                matches!(parse(&[("ano", raw)]), Err(CoreError::InvalidParameter { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_repeated_months_are_merged() {
        let report = assemble([row(3, 40.0, 1), row(1, 100.0, 2), row(3, 10.0, 1)]);

        assert_eq!(report.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(report[&3], row(3, 50.0, 2));
        assert_eq!(report[&1].batches_bought, 2);
    }

    #[test]
    fn test_rows_outside_calendar_are_dropped() {
        let report = assemble([row(0, 1.0, 1), row(13, 1.0, 1), row(12, 5.0, 1)]);
        assert_eq!(report.len(), 1);
        assert!(report.contains_key(&12));
    }

    #[test]
    fn test_json_keeps_wire_names() {
        let report = assemble([row(2, 75.5, 3)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"2": {"mes": 2, "total_gasto": 75.5, "lotes_comprados": 3}})
        );
    }
}
