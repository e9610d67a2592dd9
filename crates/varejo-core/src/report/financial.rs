//! # Financial Report Assembly
//!
//! Merges per-period revenue and expense sums into a gap-free series with
//! totals and a flat projection.
//!
//! ## Series + Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  revenue rows ──┐                                                      │
//! │                 ├─► buckets truncate(start) ..= truncate(end)          │
//! │  expense rows ──┘         missing bucket → 0                           │
//! │                                │                                        │
//! │                                ▼                                        │
//! │   series:      2024-01  2024-02  2024-03                               │
//! │                   │        │        │                                   │
//! │                   └── mean revenue / mean expense ──┐                  │
//! │                                                      ▼                  │
//! │   projection:                          2024-04  2024-05  (constant)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::filter::{parse_unsigned, QueryParams};
use crate::period::{self, DateRange, Granularity};

/// Sum per bucket start.
pub type PeriodAmounts = BTreeMap<NaiveDateTime, f64>;

/// Largest accepted `projection_days`.
pub const MAX_PROJECTION_PERIODS: u32 = 1000;

/// Largest series a single request may span.
pub const MAX_SERIES_POINTS: u64 = 5000;

// =============================================================================
// Request
// =============================================================================

/// Validated financial report parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialRequest {
    pub range: DateRange,
    pub granularity: Granularity,
    pub projection_periods: u32,
}

impl FinancialRequest {
    /// Reads `start`, `end`, `granularity` and `projection_days`
    /// (`projection_periods` is accepted as an alias).
    pub fn from_params(params: &QueryParams) -> CoreResult<Self> {
        let range = DateRange::parse(params.get("start"), params.get("end"))?;
        let granularity = Granularity::parse(params.get("granularity"))?;

        let points = period::bucket_count(range.start_time(), range.end_time(), granularity);
        if points > MAX_SERIES_POINTS {
            return Err(CoreError::invalid_parameter(
                "end",
                format!(
                    "range spans {} {} buckets, at most {} are allowed",
                    points, granularity, MAX_SERIES_POINTS
                ),
            ));
        }

        let projection_periods = match ["projection_days", "projection_periods"]
            .iter()
            .find_map(|key| params.get(key).map(|raw| (*key, raw)))
        {
            None => 0,
            Some((key, raw)) => {
                let n = parse_unsigned(raw).ok_or_else(|| {
                    CoreError::invalid_parameter(key, "must be a non-negative integer")
                })?;
                if n > MAX_PROJECTION_PERIODS {
                    return Err(CoreError::invalid_parameter(
                        key,
                        format!("must be at most {}", MAX_PROJECTION_PERIODS),
                    ));
                }
                n
            }
        };

        Ok(FinancialRequest {
            range,
            granularity,
            projection_periods,
        })
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// One bucket of the series. `profit` is always `revenue - expense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeSeriesPoint {
    pub period_label: String,
    pub revenue: f64,
    pub expense: f64,
    pub profit: f64,
}

impl TimeSeriesPoint {
    pub fn new(period_label: impl Into<String>, revenue: f64, expense: f64) -> Self {
        TimeSeriesPoint {
            period_label: period_label.into(),
            revenue,
            expense,
            profit: revenue - expense,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    pub revenue: f64,
    pub expense: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinancialReport {
    #[ts(as = "String")]
    pub period_start: NaiveDate,
    #[ts(as = "String")]
    pub period_end: NaiveDate,
    pub granularity: Granularity,
    pub totals: Totals,
    pub series: Vec<TimeSeriesPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projection: Vec<TimeSeriesPoint>,
}

// =============================================================================
// Assembly
// =============================================================================

/// Sums `(timestamp, amount)` rows into the bucket each timestamp falls in.
///
/// Rows may already be truncated by the store; truncating again is a no-op.
pub fn bucket_amounts<I>(rows: I, g: Granularity) -> PeriodAmounts
where
    I: IntoIterator<Item = (NaiveDateTime, f64)>,
{
    let mut out = PeriodAmounts::new();
    for (at, amount) in rows {
        *out.entry(period::truncate(at, g)).or_insert(0.0) += amount;
    }
    out
}

/// Builds the report from bucketed revenue and expense sums.
pub fn assemble(
    request: &FinancialRequest,
    revenue: &PeriodAmounts,
    expense: &PeriodAmounts,
) -> FinancialReport {
    let g = request.granularity;
    let mut totals = Totals::default();

    let series: Vec<TimeSeriesPoint> =
        period::buckets(request.range.start_time(), request.range.end_time(), g)
            .into_iter()
            .map(|bucket| {
                let r = revenue.get(&bucket).copied().unwrap_or(0.0);
                let e = expense.get(&bucket).copied().unwrap_or(0.0);
                totals.revenue += r;
                totals.expense += e;
                TimeSeriesPoint::new(period::label(bucket, g), r, e)
            })
            .collect();
    totals.profit = totals.revenue - totals.expense;

    let first_projected = period::next(period::truncate(request.range.end_time(), g), g);
    let projection = project(&series, first_projected, g, request.projection_periods);

    FinancialReport {
        period_start: request.range.start,
        period_end: request.range.end,
        granularity: g,
        totals,
        series,
        projection,
    }
}

/// Flat forecast: `periods` points from `from`, each at the series mean.
pub fn project(
    series: &[TimeSeriesPoint],
    from: NaiveDateTime,
    g: Granularity,
    periods: u32,
) -> Vec<TimeSeriesPoint> {
    if series.is_empty() || periods == 0 {
        return Vec::new();
    }

    let n = series.len() as f64;
    let mean_revenue = series.iter().map(|p| p.revenue).sum::<f64>() / n;
    let mean_expense = series.iter().map(|p| p.expense).sum::<f64>() / n;

    let mut at = from;
    (0..periods)
        .map(|_| {
            let point = TimeSeriesPoint::new(period::label(at, g), mean_revenue, mean_expense);
            at = period::next(at, g);
            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn request(pairs: &[(&str, &str)]) -> FinancialRequest {
        FinancialRequest::from_params(&QueryParams::from_pairs(pairs.iter().copied())).unwrap()
    }

    #[test]
    fn test_request_parsing() {
        let r = request(&[("start", "2024-01-01"), ("end", "2024-01-31")]);
        assert_eq!(r.granularity, Granularity::Day);
        assert_eq!(r.projection_periods, 0);

        let r = request(&[
            ("start", "2024-01-01"),
            ("end", "2024-01-31"),
            ("granularity", "week"),
            ("projection_periods", "3"),
        ]);
        assert_eq!(r.granularity, Granularity::Week);
        assert_eq!(r.projection_periods, 3);
    }

    #[test]
    fn test_request_rejects_bad_input() {
        for pairs in [
            vec![("end", "2024-01-31")],
            vec![("start", "2024-02-01"), ("end", "2024-01-31")],
            vec![("start", "2024-01-01"), ("end", "2024-01-31"), ("granularity", "year")],
            vec![("start", "2024-01-01"), ("end", "2024-01-31"), ("projection_days", "-1")],
            vec![("start", "2024-01-01"), ("end", "2024-01-31"), ("projection_days", "+3")],
        ] {
            let result = FinancialRequest::from_params(&QueryParams::from_pairs(pairs.clone()));
            assert!(
                matches!(result, Err(CoreError::InvalidParameter { .. })),
                "{pairs:?}"
            );
        }
    }

    #[test]
    fn test_projection_is_capped() {
        for raw in ["4294967295", "1001"] {
            let params = QueryParams::from_pairs([
                ("start", "2024-01-01"),
                ("end", "2024-01-31"),
                ("projection_days", raw),
            ]);
            let err = FinancialRequest::from_params(&params).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidParameter { ref param, .. } if param == "projection_days"),
                "{raw}"
            );
        }

        let r = request(&[
            ("start", "2024-01-01"),
            ("end", "2024-01-31"),
            ("projection_days", "1000"),
        ]);
        assert_eq!(r.projection_periods, MAX_PROJECTION_PERIODS);
    }

    #[test]
    fn test_series_length_is_capped() {
        let wide = [("start", "0001-01-01"), ("end", "9999-12-31")];
        let err = FinancialRequest::from_params(&QueryParams::from_pairs(wide)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter { ref param, .. } if param == "end"));

        // too long at month granularity as well, ten years of days fits
        let monthly = [("start", "0001-01-01"), ("end", "9999-12-31"), ("granularity", "month")];
        assert!(FinancialRequest::from_params(&QueryParams::from_pairs(monthly)).is_err());
        let r = request(&[("start", "2014-01-01"), ("end", "2023-12-31")]);
        assert_eq!(r.granularity, Granularity::Day);
    }

    #[test]
    fn test_month_report_with_projection() {
        let r = request(&[
            ("start", "2024-01-01"),
            ("end", "2024-01-31"),
            ("granularity", "month"),
            ("projection_periods", "2"),
        ]);
        let revenue = bucket_amounts(
            [(ts(2024, 1, 3, 10), 100.0), (ts(2024, 1, 28, 18), 50.0)],
            Granularity::Month,
        );
        let expense = bucket_amounts([(ts(2024, 1, 2, 0), 40.0)], Granularity::Month);

        let report = assemble(&r, &revenue, &expense);

        assert_eq!(report.series, vec![TimeSeriesPoint::new("2024-01", 150.0, 40.0)]);
        assert_eq!(
            report.projection,
            vec![
                TimeSeriesPoint::new("2024-02", 150.0, 40.0),
                TimeSeriesPoint::new("2024-03", 150.0, 40.0),
            ]
        );
        assert_eq!(report.totals.profit, 110.0);
    }

    #[test]
    fn test_series_fills_gaps() {
        let r = request(&[("start", "2024-01-01"), ("end", "2024-01-04")]);
        let revenue = bucket_amounts([(ts(2024, 1, 2, 9), 10.0)], Granularity::Day);
        let expense = bucket_amounts([(ts(2024, 1, 4, 9), 4.0)], Granularity::Day);

        let report = assemble(&r, &revenue, &expense);

        let labels: Vec<_> = report.series.iter().map(|p| p.period_label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(report.series[0], TimeSeriesPoint::new("2024-01-01", 0.0, 0.0));
        assert_eq!(report.series[3].profit, -4.0);
        assert_eq!(
            report.totals,
            Totals {
                revenue: 10.0,
                expense: 4.0,
                profit: 6.0
            }
        );
        assert!(report.projection.is_empty());
    }

    #[test]
    fn test_week_series_starts_on_monday() {
        // 2024-01-03 is a Wednesday, 2024-01-14 a Sunday
        let r = request(&[
            ("start", "2024-01-03"),
            ("end", "2024-01-14"),
            ("granularity", "week"),
        ]);
        let report = assemble(&r, &PeriodAmounts::new(), &PeriodAmounts::new());
        let labels: Vec<_> = report.series.iter().map(|p| p.period_label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01-01", "2024-01-08"]);
    }

    #[test]
    fn test_projection_grows_one_point_at_a_time() {
        let series = vec![
            TimeSeriesPoint::new("2024-01", 100.0, 20.0),
            TimeSeriesPoint::new("2024-02", 200.0, 40.0),
        ];
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_time(NaiveTime::MIN);

        assert!(project(&series, from, Granularity::Month, 0).is_empty());

        for n in 1..5u32 {
            let shorter = project(&series, from, Granularity::Month, n - 1);
            let longer = project(&series, from, Granularity::Month, n);
            assert_eq!(longer.len(), shorter.len() + 1);
            assert_eq!(&longer[..shorter.len()], &shorter[..]);
            let last = longer.last().unwrap();
            assert_eq!((last.revenue, last.expense, last.profit), (150.0, 30.0, 120.0));
        }
    }

    #[test]
    fn test_empty_series_has_no_projection() {
        let from = ts(2024, 1, 1, 0);
        assert!(project(&[], from, Granularity::Day, 3).is_empty());
    }

    #[test]
    fn test_projection_omitted_from_json_when_empty() {
        let r = request(&[("start", "2024-01-01"), ("end", "2024-01-01")]);
        let report = assemble(&r, &PeriodAmounts::new(), &PeriodAmounts::new());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("projection").is_none());
        assert_eq!(json["granularity"], "day");
        assert_eq!(json["period_start"], "2024-01-01");
    }
}
