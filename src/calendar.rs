use chrono::{Datelike, NaiveDate};

use crate::errors::{LendingError, Result};

/// advance a date by whole months, clamping the day to the target month's length
///
/// 2024-01-31 + 1 month is 2024-02-29; 2023-01-31 + 1 month is 2023-02-28.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    let total = i64::from(date.month0()) + i64::from(months);
    let year = i64::from(date.year()) + total / 12;
    let month = (total % 12) as u32 + 1;

    let year = i32::try_from(year).map_err(|_| LendingError::InvalidDate {
        message: format!("{} + {} months is out of range", date, months),
    })?;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| LendingError::InvalidDate {
        message: format!("{} + {} months is out of range", date, months),
    })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_clamps_to_leap_february() {
        assert_eq!(add_months(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_clamps_to_common_february() {
        assert_eq!(add_months(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_rolls_over_year() {
        assert_eq!(add_months(date(2023, 11, 15), 3).unwrap(), date(2024, 2, 15));
        assert_eq!(add_months(date(2023, 12, 31), 12).unwrap(), date(2024, 12, 31));
        assert_eq!(add_months(date(2024, 8, 31), 18).unwrap(), date(2026, 2, 28));
    }

    #[test]
    fn test_clamp_does_not_carry_between_steps() {
        // one jump of two months, not two jumps of one
        assert_eq!(add_months(date(2023, 1, 31), 2).unwrap(), date(2023, 3, 31));
    }

    #[test]
    fn test_zero_months_is_identity() {
        assert_eq!(add_months(date(2024, 2, 29), 0).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_century_leap_rules() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        assert!(matches!(
            add_months(NaiveDate::MAX, 1),
            Err(LendingError::InvalidDate { .. })
        ));
    }
}
