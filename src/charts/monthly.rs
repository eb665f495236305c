//! Calendar month helpers
//!
//! Month keys, labels, and the month range covered by a chart.

use chrono::{Datelike, NaiveDate};

use crate::models::record::parse_record_date;
use crate::period::months_before;

/// Get the month identifier (YYYY-MM) for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Get the month key for a date string
pub fn get_month_key(date_str: &str) -> Option<String> {
    parse_record_date(date_str).map(month_key)
}

/// Display label for a month, e.g. "Mar 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Get the first day of the month for a date
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First days of the `count` calendar months ending with the month of `now`, oldest first
pub fn month_range(now: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = month_start(now);
    (0..count)
        .rev()
        .map(|offset| months_before(current, offset))
        .collect()
}

/// Index (0 = January) of the calendar month of a date
pub fn calendar_month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}
