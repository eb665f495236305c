//! Comparison window totals
//!
//! Splits records into the current and previous windows and sums them.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{CostRecord, FinancialRecord, RevenueRecord};
use crate::period::AnalysisPeriod;

/// Half-open date range `[start, end)`; `end` of `None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl Window {
    /// Current and previous windows for a period ending at `now`
    pub fn pair(period: AnalysisPeriod, now: NaiveDate) -> (Window, Window) {
        let cutoff = period.cutoff(now);
        let prev_cutoff = period.previous_cutoff(now);
        (
            Window {
                start: cutoff,
                end: None,
            },
            Window {
                start: prev_cutoff,
                end: Some(cutoff),
            },
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date < end)
    }
}

/// Summed figures for one window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowTotals {
    pub revenue: f64,
    pub costs: f64,
    pub invoice_count: u32,
    pub client_count: u32,
}

impl WindowTotals {
    /// Calculate totals for records falling inside `window`
    pub fn from_records(
        revenue: &[RevenueRecord],
        costs: &[CostRecord],
        window: &Window,
    ) -> Self {
        let mut totals = WindowTotals::default();
        let mut clients: HashSet<&str> = HashSet::new();

        for record in revenue.iter().filter(|r| window.contains(r.date())) {
            totals.revenue += record.amount;
            totals.invoice_count += 1;
            if let Some(name) = record.counterparty_name.as_deref() {
                if !name.is_empty() {
                    clients.insert(name);
                }
            }
        }

        totals.costs = sum_in_window(costs, window);
        totals.client_count = clients.len() as u32;
        totals
    }

    pub fn profit(&self) -> f64 {
        self.revenue - self.costs
    }

    /// Profit as a percentage of revenue, 0 without revenue
    pub fn margin(&self) -> f64 {
        if self.revenue == 0.0 {
            0.0
        } else {
            self.profit() / self.revenue * 100.0
        }
    }

    /// Average invoice amount, 0 without invoices
    pub fn avg_invoice(&self) -> f64 {
        if self.invoice_count == 0 {
            0.0
        } else {
            self.revenue / self.invoice_count as f64
        }
    }
}

/// Sum the amounts of records falling inside `window`
pub fn sum_in_window<R: FinancialRecord>(records: &[R], window: &Window) -> f64 {
    records
        .iter()
        .filter(|r| window.contains(r.date()))
        .fold(0.0, |acc, r| acc + r.amount())
}

/// Relative change in percent, 0 when the previous value is 0
pub fn relative_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Relative change against the magnitude of the previous value, 0 when it is 0
///
/// Keeps the sign meaningful when the previous value is a loss.
pub fn relative_change_abs(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}
