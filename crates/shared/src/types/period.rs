//! Billing periods.
//!
//! A billing period is one calendar month. Rent due dates are matched to
//! periods by year and month only.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-letter month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
}

impl BillingPeriod {
    /// Returns the period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the period containing the UTC calendar date of `instant`.
    #[must_use]
    pub fn containing_instant(instant: DateTime<Utc>) -> Self {
        Self::containing(instant.date_naive())
    }

    /// First day of the period.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // month is always 1-12 and day 1 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the period.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// The following period.
    #[must_use]
    pub fn next(self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map_or(self, Self::containing)
    }

    /// Returns true if `date` falls within this period.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Zero-based month index, for indexing twelve-bucket series.
    #[must_use]
    pub fn month_index(self) -> usize {
        (self.month as usize).saturating_sub(1)
    }

    /// Three-letter month label.
    #[must_use]
    pub fn label(self) -> &'static str {
        MONTH_LABELS[self.month_index() % 12]
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Returns true if a due date has passed at `now`.
///
/// The due date is taken as midnight UTC at the start of that day, so a
/// payment due today is already past due once the day has begun.
#[must_use]
pub fn due_before(due_date: NaiveDate, now: DateTime<Utc>) -> bool {
    due_date.and_time(NaiveTime::MIN).and_utc() < now
}

/// Whole days from `from` to `to`, negative when `to` is earlier.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds() {
        let feb = BillingPeriod::containing(date(2024, 2, 14));
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(feb.to_string(), "2024-02");
        assert_eq!(feb.label(), "Feb");
    }

    #[test]
    fn test_period_next_rolls_over_year() {
        let dec = BillingPeriod { year: 2023, month: 12 };
        assert_eq!(dec.next(), BillingPeriod { year: 2024, month: 1 });
        assert_eq!(dec.last_day(), date(2023, 12, 31));
    }

    #[test]
    fn test_period_contains_requires_same_year() {
        let march = BillingPeriod { year: 2024, month: 3 };
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2023, 3, 15)));
        assert!(!march.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_due_before_uses_start_of_day() {
        let due = date(2024, 3, 1);
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let day_before = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();

        assert!(!due_before(due, midnight));
        assert!(due_before(due, morning));
        assert!(!due_before(due, day_before));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 3, 1)), 60);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 1, 1)), -60);
    }
}
