//! Date helpers: ranges, ages and working days

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};

use crate::Result;
use crate::error::ValidationError;

/// True when `value` lies within `start..=end`
pub fn between<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    value >= start && value <= end
}

/// Number of full years from `birth` to `today`
///
/// A birth date after `today` gives 0. Someone born on 29 February has their
/// birthday on 28 February in common years.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    if today <= birth {
        return 0;
    }

    let years = today.year() - birth.year();
    let anniversary = u32::try_from(years)
        .ok()
        .and_then(|years| birth.checked_add_months(Months::new(years * 12)));

    match anniversary {
        Some(anniversary) if today < anniversary => years - 1,
        _ => years,
    }
}

/// Number of full years from `birth` to the local date
pub fn age_in_years_today(birth: NaiveDate) -> i32 {
    age_in_years(birth, Local::now().date_naive())
}

/// Weekend length used when none is configured (Saturday and Sunday)
pub const DEFAULT_WEEKEND_LENGTH_DAYS: u32 = 2;

/// A working week whose weekend is its last few days
///
/// Weeks start on Monday, so a two day weekend is Saturday and Sunday and a
/// one day weekend is Sunday alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    weekend_length_days: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            weekend_length_days: DEFAULT_WEEKEND_LENGTH_DAYS,
        }
    }
}

impl Calendar {
    /// Create a calendar with a weekend of `weekend_length_days` days
    ///
    /// At least one working day must remain, so the length must be at most 6.
    pub fn new(weekend_length_days: u32) -> Result<Self> {
        if weekend_length_days > 6 {
            return Err(ValidationError::invalid_argument(
                "weekend_length_days",
                "a week needs at least one working day (maximum 6)",
            )
            .into());
        }
        Ok(Self {
            weekend_length_days,
        })
    }

    pub fn weekend_length_days(&self) -> u32 {
        self.weekend_length_days
    }

    /// True for days in the weekend
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        is_weekend_day(date.weekday(), self.weekend_length_days)
    }

    /// True for days outside the weekend
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date)
    }

    /// The first working day strictly after `date`
    ///
    /// `None` only when the search runs past the last representable date.
    pub fn next_workday(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut next = date.checked_add_days(Days::new(1))?;
        while self.is_weekend(next) {
            next = next.checked_add_days(Days::new(1))?;
        }
        Some(next)
    }
}

fn is_weekend_day(weekday: Weekday, weekend_length_days: u32) -> bool {
    weekday.num_days_from_monday() + weekend_length_days >= 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_between_is_inclusive() {
        let start = date(2019, 12, 1);
        let end = date(2020, 1, 1);

        assert!(between(&date(2019, 12, 13), &start, &end));
        assert!(!between(&date(2019, 11, 13), &start, &end));
        assert!(between(&start, &start, &end));
        assert!(between(&end, &start, &end));
        assert!(between(&5, &1, &10));
    }

    #[test]
    fn test_between_with_times() {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();

        assert!(between(
            &at("2019-12-13 19:19:36"),
            &at("2019-12-01 00:00:00"),
            &at("2020-01-01 00:00:00")
        ));
    }

    #[test]
    fn test_age_in_years() {
        let today = date(2024, 6, 15);

        assert_eq!(age_in_years(date(1900, 1, 1), today), 124);
        assert_eq!(age_in_years(date(2000, 6, 15), today), 24);
        assert_eq!(age_in_years(date(2000, 6, 16), today), 23);
        assert_eq!(age_in_years(date(2024, 1, 1), today), 0);
        assert_eq!(age_in_years(date(2030, 1, 1), today), 0);
    }

    #[test]
    fn test_age_for_leap_day_birth() {
        let birth = date(2000, 2, 29);

        assert_eq!(age_in_years(birth, date(2023, 2, 27)), 22);
        assert_eq!(age_in_years(birth, date(2023, 2, 28)), 23);
        assert_eq!(age_in_years(birth, date(2024, 2, 29)), 24);
    }

    #[test]
    fn test_age_today() {
        let today = Local::now().date_naive();
        assert_eq!(age_in_years_today(date(1900, 1, 1)), age_in_years(date(1900, 1, 1), today));
    }

    #[test]
    fn test_working_days_for_first_week_of_2020() {
        let calendar = Calendar::default();
        // 2020-01-01 was a Wednesday
        let expected = [true, true, true, false, false, true, true];

        for (day, working) in (1..=7).zip(expected) {
            let d = date(2020, 1, day);
            assert_eq!(calendar.is_working_day(d), working, "{d}");
            assert_eq!(calendar.is_weekend(d), !working, "{d}");
        }
    }

    #[test]
    fn test_next_workday() {
        let calendar = Calendar::default();
        let cases = [
            ((2020, 1, 1), (2020, 1, 2)),
            ((2020, 1, 2), (2020, 1, 3)),
            ((2020, 1, 3), (2020, 1, 6)),
            ((2020, 1, 4), (2020, 1, 6)),
            ((2020, 1, 5), (2020, 1, 6)),
            ((2020, 1, 6), (2020, 1, 7)),
            ((2020, 1, 7), (2020, 1, 8)),
        ];

        for ((y, m, d), (ey, em, ed)) in cases {
            assert_eq!(calendar.next_workday(date(y, m, d)), Some(date(ey, em, ed)));
        }
    }

    #[test]
    fn test_custom_weekend_length() {
        let sunday_only = Calendar::new(1).unwrap();
        assert!(sunday_only.is_working_day(date(2020, 1, 4)));
        assert!(sunday_only.is_weekend(date(2020, 1, 5)));

        let no_weekend = Calendar::new(0).unwrap();
        assert!(no_weekend.is_working_day(date(2020, 1, 5)));
        assert_eq!(no_weekend.next_workday(date(2020, 1, 4)), Some(date(2020, 1, 5)));

        // Only Monday is worked
        let long = Calendar::new(6).unwrap();
        assert_eq!(long.next_workday(date(2020, 1, 1)), Some(date(2020, 1, 6)));
        assert_eq!(long.weekend_length_days(), 6);
    }

    #[test]
    fn test_weekend_without_working_days_is_rejected() {
        assert!(Calendar::new(7).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_next_workday_at_end_of_time() {
        assert_eq!(Calendar::default().next_workday(NaiveDate::MAX), None);
    }
}
