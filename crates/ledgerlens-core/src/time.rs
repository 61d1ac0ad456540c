//! Calendar windows: period boundaries, predecessors and anchor navigation

use chrono::{Datelike, Months, NaiveDate};
use ledgerlens_config::Granularity;
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};
use super::models::Transaction;

/// First day of the month or year containing `date`
pub fn floor(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Month => date.with_day(1).unwrap_or(date),
        Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

/// Last day of the month or year containing `date`
pub fn ceil(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Month => last_day_of_month(date.year(), date.month()),
        Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(NaiveDate::MAX),
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        // Only the last representable month has no successor
        .unwrap_or(NaiveDate::MAX)
}

/// Shift a date by whole calendar units, clamping the day to the target month
fn shift(date: NaiveDate, granularity: Granularity, units: i32) -> Option<NaiveDate> {
    let months = Months::new(granularity.months() * units.unsigned_abs());
    if units >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// Move the anchor one unit forward
///
/// The day is clamped when the target month is shorter (Jan 31 → Feb 29 in a
/// leap year, Feb 29 → Feb 28 one year later).
pub fn advance(anchor: NaiveDate, granularity: Granularity) -> CoreResult<NaiveDate> {
    shift(anchor, granularity, 1).ok_or_else(|| {
        CoreError::invalid_period(format!("cannot advance {} by one {}", anchor, granularity))
    })
}

/// Move the anchor one unit back
pub fn retreat(anchor: NaiveDate, granularity: Granularity) -> CoreResult<NaiveDate> {
    shift(anchor, granularity, -1).ok_or_else(|| {
        CoreError::invalid_period(format!("cannot retreat {} by one {}", anchor, granularity))
    })
}

/// Whether advancing the anchor keeps the viewed period out of the future
///
/// Advancing is allowed as long as the period that would become current does
/// not start after `today`.
pub fn can_advance(anchor: NaiveDate, granularity: Granularity, today: NaiveDate) -> bool {
    match advance(anchor, granularity) {
        Ok(next) => !Period::containing(next, granularity).starts_after(today),
        Err(_) => false,
    }
}

/// Inclusive calendar window
///
/// `start <= end` always holds: the only ways in are the constructors below
/// and deserialization, which goes through [`Period::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds")]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
}

/// Period as written in JSON, before its bounds are checked
#[derive(Deserialize)]
struct PeriodBounds {
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
}

impl TryFrom<PeriodBounds> for Period {
    type Error = CoreError;

    fn try_from(bounds: PeriodBounds) -> CoreResult<Self> {
        Period::new(bounds.start, bounds.end, bounds.granularity)
    }
}

impl Period {
    /// Create a period from explicit bounds
    pub fn new(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::invalid_period(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end, granularity })
    }

    /// The month or year containing `date`
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start: floor(date, granularity),
            end: ceil(date, granularity),
            granularity,
        }
    }

    /// Calendar month `month` (1-12) of `year`
    pub fn month(year: i32, month: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| Self::containing(d, Granularity::Month))
            .ok_or_else(|| CoreError::invalid_period(format!("no such month: {}-{}", year, month)))
    }

    /// Calendar year `year`
    pub fn year(year: i32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .map(|d| Self::containing(d, Granularity::Year))
            .ok_or_else(|| CoreError::invalid_period(format!("no such year: {}", year)))
    }

    /// The period one calendar unit earlier
    pub fn previous(&self) -> CoreResult<Self> {
        let start = retreat(self.start, self.granularity)?;
        Ok(Self::containing(start, self.granularity))
    }

    /// The period one calendar unit later
    pub fn next(&self) -> CoreResult<Self> {
        let start = advance(self.start, self.granularity)?;
        Ok(Self::containing(start, self.granularity))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// True when the whole period lies after `today`
    pub fn starts_after(&self, today: NaiveDate) -> bool {
        self.start > today
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Calendar months intersecting this period, each clipped to it
    pub fn months(&self) -> Vec<Period> {
        let mut months = Vec::new();
        let mut cursor = self.start;

        while cursor <= self.end {
            let month_end = ceil(cursor, Granularity::Month).min(self.end);
            months.push(Period {
                start: cursor,
                end: month_end,
                granularity: Granularity::Month,
            });
            match month_end.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }

        months
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The viewed period and its direct predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPair {
    pub current: Period,
    pub previous: Period,
}

/// Resolve the period containing `anchor` and the one before it
pub fn resolve(anchor: NaiveDate, granularity: Granularity) -> CoreResult<PeriodPair> {
    let current = Period::containing(anchor, granularity);
    let previous = current.previous()?;
    log::debug!(
        "resolved {} period for {}: current {}, previous {}",
        granularity, anchor, current, previous
    );
    Ok(PeriodPair { current, previous })
}

/// Period membership test
pub trait PeriodFilter {
    /// Whether the item falls inside `period`
    fn in_period(&self, period: &Period) -> bool;
}

impl PeriodFilter for Transaction {
    fn in_period(&self, period: &Period) -> bool {
        period.contains(&self.date)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_floor_and_ceil_month() {
        assert_eq!(floor(date(2024, 2, 17), Granularity::Month), date(2024, 2, 1));
        assert_eq!(ceil(date(2024, 2, 17), Granularity::Month), date(2024, 2, 29));
        assert_eq!(ceil(date(2023, 2, 1), Granularity::Month), date(2023, 2, 28));
        assert_eq!(ceil(date(2023, 12, 5), Granularity::Month), date(2023, 12, 31));
        assert_eq!(ceil(date(2024, 4, 30), Granularity::Month), date(2024, 4, 30));
    }

    #[test]
    fn test_floor_and_ceil_year() {
        assert_eq!(floor(date(2024, 7, 4), Granularity::Year), date(2024, 1, 1));
        assert_eq!(ceil(date(2024, 7, 4), Granularity::Year), date(2024, 12, 31));
    }

    #[test]
    fn test_floor_is_idempotent() {
        let d = date(2024, 5, 23);
        let once = floor(d, Granularity::Month);
        assert_eq!(floor(once, Granularity::Month), once);
    }

    #[test]
    fn test_resolve_month() {
        let pair = resolve(date(2024, 3, 31), Granularity::Month).unwrap();
        assert_eq!(pair.current.start, date(2024, 3, 1));
        assert_eq!(pair.current.end, date(2024, 3, 31));
        assert_eq!(pair.previous.start, date(2024, 2, 1));
        assert_eq!(pair.previous.end, date(2024, 2, 29));
    }

    #[test]
    fn test_resolve_month_across_year() {
        let pair = resolve(date(2024, 1, 15), Granularity::Month).unwrap();
        assert_eq!(pair.previous.start, date(2023, 12, 1));
        assert_eq!(pair.previous.end, date(2023, 12, 31));
    }

    #[test]
    fn test_resolve_year_from_leap_day() {
        let pair = resolve(date(2024, 2, 29), Granularity::Year).unwrap();
        assert_eq!(pair.current.start, date(2024, 1, 1));
        assert_eq!(pair.current.end, date(2024, 12, 31));
        assert!(pair.current.contains(&date(2024, 2, 29)));
        assert_eq!(pair.previous.start, date(2023, 1, 1));
        assert_eq!(pair.previous.end, date(2023, 12, 31));
    }

    #[test]
    fn test_advance_and_retreat_clamp_day() {
        assert_eq!(advance(date(2024, 1, 31), Granularity::Month).unwrap(), date(2024, 2, 29));
        assert_eq!(retreat(date(2024, 3, 31), Granularity::Month).unwrap(), date(2024, 2, 29));
        assert_eq!(advance(date(2024, 2, 29), Granularity::Year).unwrap(), date(2025, 2, 28));
        assert_eq!(retreat(date(2024, 2, 29), Granularity::Year).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_navigation_out_of_range() {
        assert!(matches!(
            advance(NaiveDate::MAX, Granularity::Year),
            Err(CoreError::InvalidPeriod { .. })
        ));
        assert!(!can_advance(NaiveDate::MAX, Granularity::Month, NaiveDate::MAX));
    }

    #[test]
    fn test_can_advance() {
        let today = date(2024, 6, 10);
        // May → June: June started already
        assert!(can_advance(date(2024, 5, 20), Granularity::Month, today));
        // June → July: July is in the future
        assert!(!can_advance(date(2024, 6, 1), Granularity::Month, today));
        assert!(can_advance(date(2023, 12, 31), Granularity::Year, today));
        assert!(!can_advance(date(2024, 1, 1), Granularity::Year, today));
    }

    #[test]
    fn test_period_new_rejects_inverted_bounds() {
        let result = Period::new(date(2024, 2, 1), date(2024, 1, 31), Granularity::Month);
        assert!(matches!(result, Err(CoreError::InvalidPeriod { .. })));
        assert!(Period::new(date(2024, 2, 1), date(2024, 2, 1), Granularity::Month).is_ok());
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let json = r#"{"start":"2024-12-31","end":"2024-01-01","granularity":"year"}"#;
        let result: Result<Period, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("start 2024-12-31 is after end 2024-01-01"), "{}", err);

        let json = r#"{"start":"2024-01-01","end":"2024-12-31","granularity":"year"}"#;
        let period: Period = serde_json::from_str(json).unwrap();
        assert_eq!(period, Period::year(2024).unwrap());
        assert_eq!(serde_json::to_string(&period).unwrap(), json);
    }

    #[test]
    fn test_period_month_constructor() {
        let p = Period::month(2023, 2).unwrap();
        assert_eq!(p.end, date(2023, 2, 28));
        assert_eq!(p.days(), 28);
        assert!(Period::month(2023, 13).is_err());
    }

    #[test]
    fn test_period_next_and_previous() {
        let p = Period::year(2023).unwrap();
        assert_eq!(p.next().unwrap(), Period::year(2024).unwrap());
        assert_eq!(p.previous().unwrap(), Period::year(2022).unwrap());
        assert_eq!(Period::year(2024).unwrap().days(), 366);
    }

    #[test]
    fn test_months_of_full_year() {
        let months = Period::year(2024).unwrap().months();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].start, date(2024, 1, 1));
        assert_eq!(months[1].end, date(2024, 2, 29));
        assert_eq!(months[11].end, date(2024, 12, 31));
        for pair in months.windows(2) {
            assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
        }
    }

    #[test]
    fn test_months_of_partial_window() {
        let p = Period::new(date(2024, 3, 15), date(2024, 5, 10), Granularity::Year).unwrap();
        let months = p.months();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].start, date(2024, 3, 15));
        assert_eq!(months[0].end, date(2024, 3, 31));
        assert_eq!(months[2].start, date(2024, 5, 1));
        assert_eq!(months[2].end, date(2024, 5, 10));
    }

    #[test]
    fn test_starts_after() {
        let p = Period::month(2024, 7).unwrap();
        assert!(p.starts_after(date(2024, 6, 30)));
        assert!(!p.starts_after(date(2024, 7, 1)));
    }
}
