//! # Recurring Start Date
//!
//! Computes the first billing date of a subscription agreement.
//!
//! PayPal rejects agreements that start less than 24 hours out, so an
//! immediate start is pushed 25 hours ahead. A fixed day of month lands at
//! midday so the provider's date conversion never shifts it across a day
//! boundary.

use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

/// Lead time for an immediate start
pub const IMMEDIATE_START_LEAD_HOURS: i64 = 25;

/// Hour of day a fixed-day start is placed at
pub const MIDDAY_OFFSET_HOURS: i64 = 12;

/// Configured start of the billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringStart {
    /// Bill as soon as the provider allows
    Immediate,
    /// Bill on this day of the month (1-31)
    DayOfMonth(u8),
}

impl RecurringStart {
    /// `0` means immediate, `1..=31` a day of the month
    pub fn from_day(day: u8) -> PaymentResult<Self> {
        match day {
            0 => Ok(RecurringStart::Immediate),
            1..=31 => Ok(RecurringStart::DayOfMonth(day)),
            other => Err(PaymentError::Configuration(format!(
                "recurring_start_date must be between 0 and 31, got {}",
                other
            ))),
        }
    }

    pub fn as_day(&self) -> u8 {
        match self {
            RecurringStart::Immediate => 0,
            RecurringStart::DayOfMonth(day) => *day,
        }
    }

    /// First billing date relative to `now`, in `now`'s offset.
    ///
    /// For a fixed day the next occurrence is used when today is already on
    /// or past it; the day is clamped to the target month's length.
    pub fn first_billing_date(
        &self,
        now: DateTime<FixedOffset>,
    ) -> PaymentResult<DateTime<FixedOffset>> {
        let day = match self {
            RecurringStart::Immediate => {
                return Ok(now + Duration::hours(IMMEDIATE_START_LEAD_HOURS))
            }
            RecurringStart::DayOfMonth(day) => *day as u32,
        };

        let (mut year, mut month) = (now.year(), now.month());
        if now.day() >= day {
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        let month_len = days_in_month(year, month).ok_or_else(|| {
            PaymentError::Internal(format!("invalid billing month {}-{}", year, month))
        })?;
        let day = day.min(month_len);
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            PaymentError::Internal(format!("invalid billing date {}-{}-{}", year, month, day))
        })?;

        let midnight = now
            .offset()
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(|| PaymentError::Internal(format!("ambiguous billing date {}", date)))?;

        Ok(midnight + Duration::hours(MIDDAY_OFFSET_HOURS))
    }
}

impl Default for RecurringStart {
    fn default() -> Self {
        RecurringStart::Immediate
    }
}

/// Number of days in a month, or `None` for an invalid month or year
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month.checked_add(1)?)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// RFC 3339 with offset, seconds precision (`2024-05-31T12:00:00Z`)
pub fn format_start_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn test_from_day_bounds() {
        assert_eq!(RecurringStart::from_day(0).unwrap(), RecurringStart::Immediate);
        assert_eq!(RecurringStart::from_day(31).unwrap(), RecurringStart::DayOfMonth(31));
        assert!(RecurringStart::from_day(32).is_err());
    }

    #[test]
    fn test_immediate_is_25_hours_ahead() {
        let now = at(2024, 6, 15, 9);
        let start = RecurringStart::Immediate.first_billing_date(now).unwrap();
        assert_eq!(start - now, Duration::hours(25));
    }

    #[test]
    fn test_later_day_this_month() {
        let start = RecurringStart::DayOfMonth(20)
            .first_billing_date(at(2024, 6, 15, 9))
            .unwrap();
        assert_eq!(start, at(2024, 6, 20, 12));
    }

    #[test]
    fn test_same_day_rolls_to_next_month() {
        let start = RecurringStart::DayOfMonth(15)
            .first_billing_date(at(2024, 6, 15, 9))
            .unwrap();
        assert_eq!(start, at(2024, 7, 15, 12));
    }

    #[test]
    fn test_day_31_into_30_day_month() {
        // March 31st, next month is April with 30 days
        let start = RecurringStart::DayOfMonth(31)
            .first_billing_date(at(2024, 3, 31, 9))
            .unwrap();
        assert_eq!(start, at(2024, 4, 30, 12));
    }

    #[test]
    fn test_day_31_within_30_day_month() {
        let start = RecurringStart::DayOfMonth(31)
            .first_billing_date(at(2024, 4, 10, 9))
            .unwrap();
        assert_eq!(start, at(2024, 4, 30, 12));
    }

    #[test]
    fn test_day_31_into_february() {
        let start = RecurringStart::DayOfMonth(31)
            .first_billing_date(at(2023, 1, 31, 9))
            .unwrap();
        assert_eq!(start, at(2023, 2, 28, 12));

        let leap = RecurringStart::DayOfMonth(30)
            .first_billing_date(at(2024, 1, 30, 9))
            .unwrap();
        assert_eq!(leap, at(2024, 2, 29, 12));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let start = RecurringStart::DayOfMonth(1)
            .first_billing_date(at(2024, 12, 5, 9))
            .unwrap();
        assert_eq!(start, at(2025, 1, 1, 12));
    }

    #[test]
    fn test_keeps_offset_of_now() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap();

        let start = RecurringStart::DayOfMonth(20).first_billing_date(now).unwrap();

        assert_eq!(start, offset.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap());
        assert_eq!(format_start_date(&start), "2024-06-20T12:00:00+02:00");
    }

    #[test]
    fn test_never_produces_day_past_month_end() {
        for year in [2023, 2024] {
            let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
            while date.year() == year {
                let now = Utc
                    .from_utc_datetime(&date.and_hms_opt(18, 0, 0).unwrap())
                    .fixed_offset();
                for configured in 1..=31u8 {
                    let start = RecurringStart::DayOfMonth(configured)
                        .first_billing_date(now)
                        .unwrap();
                    let month_len = days_in_month(start.year(), start.month()).unwrap();

                    assert!(start.day() <= month_len);
                    assert_eq!(start.day(), (configured as u32).min(month_len));
                    assert_eq!(start.hour(), 12);
                }
                date = date.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_format_utc() {
        let start = at(2024, 5, 31, 12);
        assert_eq!(format_start_date(&start), "2024-05-31T12:00:00Z");
    }
}
