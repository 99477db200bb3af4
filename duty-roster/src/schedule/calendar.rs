use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Day-class counts for one month.
///
/// "Weekend" means Friday and Saturday nights. Counts are signed because the
/// closed-form derivation can dip below zero for months shorter than a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInfo {
    pub days: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day: u8,
    pub num_weekends: i64,
    pub num_weekdays: i64,
    pub num_thursdays: i64,
    pub num_weekdays_excl_thursday: i64,
}

impl MonthInfo {
    /// Closed-form day-class counts. `%` keeps the dividend's sign and `/ 7`
    /// floors, so short months reproduce the historical counts exactly.
    pub fn derive(days: u32, first_day: u8) -> Self {
        let first = i64::from(first_day);
        let days_after_first_week = i64::from(days) - 7 + first;
        let days_in_last_week = days_after_first_week % 7;
        let full_weeks_after_first = days_after_first_week.div_euclid(7);

        let base = if first_day == 6 { 1 } else { 2 };
        let weekend_tail = if days_in_last_week > 5 {
            days_in_last_week - 5
        } else {
            0
        };
        let num_weekends = base
            + 2 * full_weeks_after_first
            + if days_in_last_week > 4 { weekend_tail } else { 0 };

        let thursday_base = if first_day > 4 { 0 } else { 1 };
        let num_thursdays = thursday_base
            + full_weeks_after_first
            + if days_in_last_week > 4 { 1 } else { 0 };

        let num_weekdays = i64::from(days) - num_weekends;

        Self {
            days,
            first_day,
            num_weekends,
            num_weekdays,
            num_thursdays,
            num_weekdays_excl_thursday: num_weekdays - num_thursdays,
        }
    }

    /// Weekday index (0 = Sunday) of calendar day `day`.
    pub fn weekday_of(&self, day: u32) -> u8 {
        ((u32::from(self.first_day) + day - 1) % 7) as u8
    }

    /// `(day, weekday)` pairs for days 1..=D. The weekday index starts at the
    /// month's first weekday and advances once per day.
    pub fn days_with_weekday(&self) -> impl Iterator<Item = (u32, u8)> {
        let first_day = u32::from(self.first_day);
        (1..=self.days).map(move |day| (day, ((first_day + day - 1) % 7) as u8))
    }
}

/// Days in the month and its first weekday (0 = Sunday) for a calendar month.
pub fn month_shape(year: i32, month: u32) -> Result<(u32, u8)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ScheduleError::InvalidConfig(format!("{year}-{month:02} is not a valid month")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| ScheduleError::InvalidConfig(format!("{year}-{month:02} has no following month")))?;

    let days = (next - first).num_days() as u32;
    let first_day = first.weekday().num_days_from_sunday() as u8;
    Ok((days, first_day))
}

/// Parses `YYYY-MM` into `(days, first_day)`.
pub fn parse_month(value: &str) -> Result<(u32, u8)> {
    let invalid = || ScheduleError::InvalidConfig(format!("month must look like YYYY-MM, got {value:?}"));
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    month_shape(year, month)
}
