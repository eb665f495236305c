//! Seasonality analysis
//!
//! Revenue volatility across calendar months (January through December),
//! aggregated over every year present in the input.

use crate::charts::monthly::calendar_month_index;
use crate::models::{FinancialRecord, RevenueRecord};

/// Revenue summed per calendar month; index 0 is January
///
/// Records from different years in the same month share a bucket.
pub fn revenue_by_calendar_month(revenue: &[RevenueRecord]) -> [f64; 12] {
    let mut months = [0.0; 12];
    for record in revenue {
        months[calendar_month_index(record.date())] += record.amount();
    }
    months
}

/// Population mean and standard deviation
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

/// Coefficient of variation (std dev / mean) of calendar-month revenue
///
/// `None` when there is no revenue to compare against.
pub fn monthly_coefficient_of_variation(revenue: &[RevenueRecord]) -> Option<f64> {
    let months = revenue_by_calendar_month(revenue);
    let (mean, std_dev) = mean_and_std_dev(&months);

    if mean <= 0.0 {
        return None;
    }

    Some(std_dev / mean)
}

/// Calendar month index with the highest and lowest revenue
pub fn peak_and_trough(revenue: &[RevenueRecord]) -> (usize, usize) {
    let months = revenue_by_calendar_month(revenue);
    let mut peak = 0;
    let mut trough = 0;

    for (i, value) in months.iter().enumerate() {
        if *value > months[peak] {
            peak = i;
        }
        if *value < months[trough] {
            trough = i;
        }
    }

    (peak, trough)
}

/// English name of a calendar month index
pub fn month_name(index: usize) -> &'static str {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    NAMES.get(index).copied().unwrap_or("Unknown")
}
