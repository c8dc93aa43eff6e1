use crate::types::error::AppError;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// Query-string helper: absent means the weekly board.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None => Ok(Period::Week),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "today" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(AppError::BadRequest(format!("unknown period '{other}'"))),
        }
    }
}

/// Half-open `[start, end)` span of instants covering one local day, week or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    offset: FixedOffset,
}

// Postgres timestamptz tops out well below chrono's max, so "all time" ends here.
const ALL_TIME_DAYS: i64 = 3_000_000;

impl PeriodWindow {
    /// Window of `period` that contains `now`, with boundaries cut at local midnight in `offset`.
    pub fn current(period: Period, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = now.with_timezone(&offset).date_naive();
        Self::containing(period, today, offset)
    }

    fn containing(period: Period, date: NaiveDate, offset: FixedOffset) -> Self {
        let (start, end) = match period {
            Period::Day => (date, date + Duration::days(1)),
            Period::Week => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(7))
            }
            Period::Month => {
                let first = first_of_month(date);
                (first, first_of_month(first + Duration::days(32)))
            }
            Period::All => {
                let start = DateTime::<Utc>::UNIX_EPOCH;
                return Self {
                    period,
                    start,
                    end: start + Duration::days(ALL_TIME_DAYS),
                    offset,
                };
            }
        };

        Self {
            period,
            start: local_midnight(start, offset),
            end: local_midnight(end, offset),
            offset,
        }
    }

    /// The window right before this one. `All` has none.
    pub fn previous(&self) -> Option<Self> {
        if self.period == Period::All {
            return None;
        }
        let day_before = self.local_start_date() - Duration::days(1);
        Some(Self::containing(self.period, day_before, self.offset))
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn local_start_date(&self) -> NaiveDate {
        self.start.with_timezone(&self.offset).date_naive()
    }

    /// Last local day inside the window.
    pub fn local_last_date(&self) -> NaiveDate {
        self.end.with_timezone(&self.offset).date_naive() - Duration::days(1)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(local - Duration::seconds(offset.local_minus_utc() as i64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_defaults_to_week_and_rejects_garbage() {
        assert_eq!(Period::parse(None).unwrap(), Period::Week);
        assert_eq!(Period::parse(Some("MONTH")).unwrap(), Period::Month);
        assert_eq!(Period::parse(Some("today")).unwrap(), Period::Day);
        assert!(matches!(Period::parse(Some("year")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn day_is_cut_at_local_midnight() {
        // Sunday 15:30 UTC is already Monday 00:30 in Seoul.
        let w = PeriodWindow::current(Period::Day, utc("2026-10-18T15:30:00Z"), kst());
        assert_eq!(w.start, utc("2026-10-18T15:00:00Z"));
        assert_eq!(w.end, utc("2026-10-19T15:00:00Z"));
        assert_eq!(w.local_start_date(), date(2026, 10, 19));
        assert_eq!(w.local_last_date(), date(2026, 10, 19));
    }

    #[test]
    fn week_starts_on_local_monday() {
        let w = PeriodWindow::current(Period::Week, utc("2026-10-18T15:30:00Z"), kst());
        assert_eq!(w.local_start_date(), date(2026, 10, 19));
        assert_eq!(w.end - w.start, Duration::days(7));

        // Half an hour earlier it is still Sunday locally: previous week.
        let w = PeriodWindow::current(Period::Week, utc("2026-10-18T14:30:00Z"), kst());
        assert_eq!(w.local_start_date(), date(2026, 10, 12));
        assert_eq!(w.local_last_date(), date(2026, 10, 18));
        assert!(w.contains(utc("2026-10-18T14:59:59Z")));
        assert!(!w.contains(utc("2026-10-18T15:00:00Z")));
    }

    #[test]
    fn month_rolls_over_the_year() {
        // 2027-01-01 01:00 in Seoul.
        let w = PeriodWindow::current(Period::Month, utc("2026-12-31T16:00:00Z"), kst());
        assert_eq!(w.local_start_date(), date(2027, 1, 1));
        assert_eq!(w.local_last_date(), date(2027, 1, 31));

        let prev = w.previous().unwrap();
        assert_eq!(prev.local_start_date(), date(2026, 12, 1));
        assert_eq!(prev.local_last_date(), date(2026, 12, 31));
        assert_eq!(prev.end, w.start);
    }

    #[test]
    fn previous_week_is_adjacent() {
        let w = PeriodWindow::current(Period::Week, utc("2027-01-01T03:00:00Z"), kst());
        assert_eq!(w.local_start_date(), date(2026, 12, 28));
        let prev = w.previous().unwrap();
        assert_eq!(prev.local_start_date(), date(2026, 12, 21));
        assert_eq!(prev.local_last_date(), date(2026, 12, 27));
        assert_eq!(prev.end, w.start);
    }

    #[test]
    fn february_in_a_leap_year() {
        let w = PeriodWindow::current(Period::Month, utc("2028-02-10T00:00:00Z"), kst());
        assert_eq!(w.local_last_date(), date(2028, 2, 29));
    }

    #[test]
    fn all_time_has_no_previous_and_contains_everything() {
        let now = utc("2026-10-18T00:00:00Z");
        let w = PeriodWindow::current(Period::All, now, kst());
        assert!(w.previous().is_none());
        assert!(w.contains(utc("1999-01-01T00:00:00Z")));
        assert!(w.contains(now));
    }

    #[test]
    fn utc_offset_zero_matches_calendar_dates() {
        let w = PeriodWindow::current(Period::Day, utc("2026-10-18T23:59:00Z"), FixedOffset::east_opt(0).unwrap());
        assert_eq!(w.start, utc("2026-10-18T00:00:00Z"));
    }
}
