//! # Report Periods
//!
//! Bucketing of timestamps for the financial and payroll reports.
//!
//! ## Bucket Walk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start ──► truncate(start) ──► next ──► next ──► ... ──► truncate(end) │
//! │                 │                │        │                   │        │
//! │               label            label    label               label      │
//! │                                                                         │
//! │  Day    2024-01-31 13:00 → 2024-01-31 00:00  label "2024-01-31"        │
//! │  Week   2024-01-07 (Sun) → 2024-01-01 (Mon)  label "2024-01-01"        │
//! │  Month  2024-01-31 13:00 → 2024-01-01 00:00  label "2024-01"           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weeks start on the ISO Monday, so Sunday is the last day of the previous
//! week. This matches PostgreSQL `date_trunc('week', ...)`.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Time-bucket size for report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Parses the `granularity` query value. Absent or blank means `Day`.
    pub fn parse(raw: Option<&str>) -> CoreResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Granularity::Day),
            Some("day") => Ok(Granularity::Day),
            Some("week") => Ok(Granularity::Week),
            Some("month") => Ok(Granularity::Month),
            Some(other) => Err(CoreError::invalid_parameter(
                "granularity",
                format!("`{}` is not one of day, week, month", other),
            )),
        }
    }

    /// The `date_trunc` unit for this granularity.
    pub const fn sql_unit(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_unit())
    }
}

/// Midnight at the start of `t`'s bucket.
pub fn truncate(t: NaiveDateTime, g: Granularity) -> NaiveDateTime {
    let date = t.date();
    let start = match g {
        Granularity::Day => date,
        Granularity::Week => {
            date - Duration::days(i64::from(date.weekday().number_from_monday()) - 1)
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
    };
    start.and_time(NaiveTime::MIN)
}

/// Start of the bucket after the one beginning at `t`.
///
/// Month steps keep the day of month clamped to the target month's length.
pub fn next(t: NaiveDateTime, g: Granularity) -> NaiveDateTime {
    match g {
        Granularity::Day => t + Duration::days(1),
        Granularity::Week => t + Duration::days(7),
        Granularity::Month => t
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDateTime::MAX),
    }
}

/// Display label of the bucket starting at `t`.
pub fn label(t: NaiveDateTime, g: Granularity) -> String {
    match g {
        Granularity::Day | Granularity::Week => t.format("%Y-%m-%d").to_string(),
        Granularity::Month => t.format("%Y-%m").to_string(),
    }
}

/// Bucket starts from `truncate(start)` through `truncate(end)` inclusive.
pub fn buckets(start: NaiveDateTime, end: NaiveDateTime, g: Granularity) -> Vec<NaiveDateTime> {
    let last = truncate(end, g);
    let mut current = truncate(start, g);
    let mut out = Vec::new();
    while current <= last {
        out.push(current);
        current = next(current, g);
    }
    out
}

/// Number of buckets [`buckets`] yields for the same arguments.
pub fn bucket_count(start: NaiveDateTime, end: NaiveDateTime, g: Granularity) -> u64 {
    let first = truncate(start, g).date();
    let last = truncate(end, g).date();
    if last < first {
        return 0;
    }
    let steps = match g {
        Granularity::Day => (last - first).num_days(),
        Granularity::Week => (last - first).num_days() / 7,
        Granularity::Month => months_between(first, last),
    };
    steps as u64 + 1
}

/// Whole calendar months from `from`'s month to `to`'s month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

// =============================================================================
// Date Range
// =============================================================================

/// A validated `[start, end]` report range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parses `start`/`end` query values (`YYYY-MM-DD`, both required,
    /// `end >= start`).
    pub fn parse(start: Option<&str>, end: Option<&str>) -> CoreResult<Self> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        if end < start {
            return Err(CoreError::invalid_parameter("end", "must not be before `start`"));
        }
        Ok(DateRange { start, end })
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }
}

fn parse_date(param: &str, raw: Option<&str>) -> CoreResult<NaiveDate> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::invalid_parameter(param, "is required"))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::invalid_parameter(param, format!("`{}` is not a YYYY-MM-DD date", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 15)
            .unwrap()
    }

    const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    #[test]
    fn test_parse_granularity() {
        assert_eq!(Granularity::parse(None), Ok(Granularity::Day));
        assert_eq!(Granularity::parse(Some("  ")), Ok(Granularity::Day));
        assert_eq!(Granularity::parse(Some("week")), Ok(Granularity::Week));
        assert_eq!(Granularity::parse(Some("month")), Ok(Granularity::Month));
        assert!(matches!(
            Granularity::parse(Some("year")),
            Err(CoreError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_truncate() {
        let t = at(2024, 1, 31, 13);
        assert_eq!(
            truncate(t, Granularity::Day),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_time(NaiveTime::MIN)
        );
        assert_eq!(
            truncate(t, Granularity::Month),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn test_week_starts_on_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_time(NaiveTime::MIN);
        // 2024-01-07 is a Sunday
        assert_eq!(truncate(at(2024, 1, 7, 23), Granularity::Week), monday);
        assert_eq!(truncate(at(2024, 1, 1, 0), Granularity::Week), monday);
        assert_eq!(
            truncate(at(2024, 1, 8, 0), Granularity::Week),
            monday + Duration::days(7)
        );
    }

    #[test]
    fn test_next_month_varies_in_length() {
        let jan = truncate(at(2024, 1, 15, 0), Granularity::Month);
        let feb = next(jan, Granularity::Month);
        let mar = next(feb, Granularity::Month);
        assert_eq!(label(feb, Granularity::Month), "2024-02");
        assert_eq!(label(mar, Granularity::Month), "2024-03");
        assert_eq!(mar - feb, Duration::days(29));
    }

    #[test]
    fn test_labels() {
        let t = truncate(at(2024, 3, 9, 8), Granularity::Week);
        assert_eq!(label(t, Granularity::Week), "2024-03-04");
        assert_eq!(label(t, Granularity::Day), "2024-03-04");
    }

    #[test]
    fn test_bucketing_properties() {
        // Walk every hour-ish step across two years, including a leap day.
        let mut t = at(2023, 11, 1, 0);
        let stop = at(2025, 3, 1, 0);
        while t < stop {
            for g in ALL {
                let b = truncate(t, g);
                let n = next(b, g);
                assert!(b <= t, "{t} {g}");
                assert!(n > b, "{t} {g}");
                assert_eq!(truncate(n, g), n, "{t} {g}");
                assert_eq!(truncate(b, g), b, "{t} {g}");
            }
            t += Duration::hours(17);
        }
    }

    #[test]
    fn test_buckets_are_contiguous() {
        let start = at(2024, 1, 30, 0);
        let end = at(2024, 2, 2, 23);
        let days = buckets(start, end, Granularity::Day);
        assert_eq!(days.len(), 4);
        assert_eq!(label(days[3], Granularity::Day), "2024-02-02");

        let months = buckets(start, end, Granularity::Month);
        assert_eq!(
            months.iter().map(|m| label(*m, Granularity::Month)).collect::<Vec<_>>(),
            vec!["2024-01", "2024-02"]
        );
    }

    #[test]
    fn test_bucket_count_matches_buckets() {
        let start = at(2023, 12, 27, 5);
        for days in [0, 1, 6, 7, 30, 61, 400] {
            let end = start + Duration::days(days);
            for g in ALL {
                assert_eq!(
                    bucket_count(start, end, g),
                    buckets(start, end, g).len() as u64,
                    "{days} {g}"
                );
            }
        }
        assert_eq!(bucket_count(at(2024, 2, 1, 0), at(2024, 1, 1, 0), Granularity::Day), 0);
    }

    #[test]
    fn test_bucket_count_of_widest_range() {
        let start = NaiveDate::from_ymd_opt(1, 1, 1).unwrap().and_time(NaiveTime::MIN);
        let end = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(bucket_count(start, end, Granularity::Month), 9999 * 12);
        assert!(bucket_count(start, end, Granularity::Day) > 3_000_000);
    }

    #[test]
    fn test_month_end() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(month_end(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(month_end(d(2023, 2, 1)), d(2023, 2, 28));
        assert_eq!(month_end(d(2024, 12, 31)), d(2024, 12, 31));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(range.end - range.start, Duration::days(30));

        assert!(DateRange::parse(None, Some("2024-01-31")).is_err());
        assert!(DateRange::parse(Some("2024-01-01"), Some("")).is_err());
        assert!(DateRange::parse(Some("01/01/2024"), Some("2024-01-31")).is_err());

        let err = DateRange::parse(Some("2024-02-01"), Some("2024-01-31")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter { ref param, .. } if param == "end"));
    }
}
