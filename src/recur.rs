// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Cadence;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Next due timestamp for a schedule after an occurrence at `current`.
///
/// Daily and weekly cadences keep the time of day and step the calendar date.
/// Monthly keeps the day-of-month and time-of-day, clamping the day to the
/// last valid day of the target month (Jan 31 -> Feb 28, or Feb 29 on leap
/// years). A `once` schedule completes instead of advancing, so the
/// calculator treats it as identity.
pub fn next_occurrence(current: NaiveDateTime, cadence: Cadence) -> NaiveDateTime {
    match cadence {
        Cadence::Once => current,
        Cadence::Daily => current + Duration::days(1),
        Cadence::Weekly => current + Duration::days(7),
        Cadence::Monthly => add_month_clamped(current),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month {} out of range", month),
    }
}

fn add_month_clamped(dt: NaiveDateTime) -> NaiveDateTime {
    let (year, month) = if dt.month() == 12 {
        (dt.year() + 1, 1)
    } else {
        (dt.year(), dt.month() + 1)
    };
    let day = dt.day().min(days_in_month(year, month));
    // The day is clamped to the target month's length, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| dt.date())
        .and_hms_opt(dt.hour(), dt.minute(), dt.second())
        .unwrap_or(dt)
}
