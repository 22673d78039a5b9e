//! Calendar arithmetic and the working-day to office-day conversion.
//!
//! MIT License
//!
//! Copyright (c) 2026 buerotage contributors
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all
//! copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//! IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//! AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//! LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//! OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//! SOFTWARE.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::section::Unit;

/// Number of working days one week stands for when converting quantities
const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// Contracts at or above this weekly hour count are treated as full time
const FULL_TIME_THRESHOLD_HOURS: f64 = 35.0;

/// Weekly hours of a full-time contract
const FULL_TIME_HOURS: f64 = 40.0;

/// Converts a user-entered quantity and unit into working-day equivalents
///
/// # Arguments
/// * `quantity` - User-entered amount, `None` when the field is unset
/// * `unit` - Unit the amount is given in, `None` when the field is unset
///
/// # Returns
/// * Working-day equivalents; a week counts as exactly 5 days
///
/// # Note
/// This is the single normalization point for malformed input: an unset or
/// non-finite or negative quantity, or an unset unit, yields 0 rather than
/// an error.
pub fn days_from_quantity(quantity: Option<f64>, unit: Option<Unit>) -> f64 {
    let quantity = quantity
        .filter(|q| q.is_finite() && *q >= 0.0)
        .unwrap_or(0.0);

    match unit {
        Some(Unit::Days) => quantity,
        Some(Unit::Weeks) => quantity * WORKING_DAYS_PER_WEEK,
        None => 0.0,
    }
}

/// Checks whether two dates fall on the same calendar day
///
/// Compares year, month and day-of-month only.
pub fn is_same_calendar_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Moves a date to the given weekday within its current week
///
/// # Arguments
/// * `date` - Starting date
/// * `weekday_index` - Target weekday, 0 = Sunday through 6 = Saturday
///
/// # Returns
/// * The date shifted by the signed difference between the target and the
///   current weekday index, rolling across month boundaries where needed
pub fn move_to_weekday(date: NaiveDate, weekday_index: u32) -> NaiveDate {
    let current = date.weekday().num_days_from_sunday() as i64;
    let day_diff = weekday_index as i64 - current;

    date + Duration::days(day_diff)
}

/// Counts the working days of one month against a holiday calendar
///
/// # Arguments
/// * `year` - Four-digit calendar year
/// * `month` - Month number, 1 through 12
/// * `holiday_dates` - Dates that do not count as working days
///
/// # Returns
/// * Number of days in the month that are Monday through Friday and not
///   listed as a holiday
///
/// # Note
/// Month length and leap years come from calendar rollover, never from a
/// fixed day count. An invalid year/month combination yields 0.
pub fn count_working_days_in_month(year: i32, month: u32, holiday_dates: &[NaiveDate]) -> u32 {
    let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };

    let mut counter_date = first_of_month;
    let mut working_days = 0;

    while counter_date.year() == year && counter_date.month() == month {
        // Day is between monday and friday
        if !matches!(counter_date.weekday(), Weekday::Sat | Weekday::Sun) {
            let is_holiday = holiday_dates
                .iter()
                .any(|holiday| is_same_calendar_day(*holiday, counter_date));

            if !is_holiday {
                working_days += 1;
            }
        }

        counter_date = match counter_date.succ_opt() {
            Some(next_day) => next_day,
            None => break,
        };
    }

    working_days
}

/// Converts a working-day total into the required office-presence days
///
/// # Arguments
/// * `working_days` - Signed working-day total from the aggregation engine
/// * `business_trip_days` - Business-trip days, substituting for presence
/// * `weekly_working_hours` - Contracted weekly hours, `None` when unset
///
/// # Returns
/// * Required office days, never negative
///
/// # Policy
/// Contracts of 35 hours or more are treated as 40 hours in terms of office
/// days; at full-time load, presence is required 2 out of every 5 working
/// days, prorated linearly by the effective hours. The base formula is
/// rounded to whole days (half away from zero) before business-trip days
/// are subtracted.
pub fn working_days_to_office_days(
    working_days: f64,
    business_trip_days: f64,
    weekly_working_hours: Option<f64>,
) -> f64 {
    let weekly_working_hours = weekly_working_hours
        .filter(|hours| hours.is_finite())
        .unwrap_or(0.0);

    let effective_hours = if weekly_working_hours >= FULL_TIME_THRESHOLD_HOURS {
        FULL_TIME_HOURS
    } else {
        weekly_working_hours
    };

    let required_office_days =
        ((2.0 / FULL_TIME_HOURS * effective_hours) / WORKING_DAYS_PER_WEEK * working_days).round();

    (required_office_days - business_trip_days).max(0.0)
}
