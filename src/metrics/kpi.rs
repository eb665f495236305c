//! KPI calculation
//!
//! Computes the six financial KPIs for the current window against the
//! previous window of equal length.

use chrono::NaiveDate;

use super::window::{relative_change, relative_change_abs, Window, WindowTotals};
use crate::models::{CostRecord, KpiId, KpiMetric, KpiStatus, KpiUnit, RevenueRecord};
use crate::period::AnalysisPeriod;

/// Status thresholds; these are fixed and not configurable
mod thresholds {
    /// Revenue trend below this is critical
    pub const REVENUE_CRITICAL_TREND: f64 = -10.0;
    /// Cost growth above this is critical
    pub const COST_CRITICAL_TREND: f64 = 15.0;
    /// Margin above this is good
    pub const MARGIN_GOOD: f64 = 20.0;
    /// Margin below this is critical
    pub const MARGIN_CRITICAL: f64 = 10.0;
    /// Client count above this is good
    pub const CLIENTS_GOOD: u32 = 5;
    /// Client count below this is critical
    pub const CLIENTS_CRITICAL: u32 = 3;
    /// Average invoice trend below this is critical
    pub const AVG_INVOICE_CRITICAL_TREND: f64 = -15.0;
}

/// Target margin in percent
pub const MARGIN_TARGET: f64 = thresholds::MARGIN_GOOD;

/// Calculate all KPIs for `period` ending at `now`
///
/// Always returns six metrics in the order of [`KpiId::ALL`].
pub fn calculate_kpis(
    revenue: &[RevenueRecord],
    costs: &[CostRecord],
    period: AnalysisPeriod,
    now: NaiveDate,
) -> Vec<KpiMetric> {
    let (current_window, previous_window) = Window::pair(period, now);
    let current = WindowTotals::from_records(revenue, costs, &current_window);
    let previous = WindowTotals::from_records(revenue, costs, &previous_window);

    tracing::debug!(
        period = period.as_str(),
        current_revenue = current.revenue,
        previous_revenue = previous.revenue,
        current_costs = current.costs,
        previous_costs = previous.costs,
        "Window totals computed"
    );

    vec![
        revenue_kpi(&current, &previous),
        costs_kpi(&current, &previous),
        profit_kpi(&current, &previous),
        margin_kpi(&current, &previous),
        client_diversity_kpi(&current, &previous),
        avg_invoice_kpi(&current, &previous),
    ]
}

fn revenue_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let trend = relative_change(current.revenue, previous.revenue);

    KpiMetric::new(
        KpiId::Revenue,
        "Total Revenue",
        current.revenue,
        previous.revenue,
        KpiUnit::Currency,
        trend,
        revenue_status(trend),
        "Sum of invoiced amounts in the period",
    )
}

fn costs_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let trend = relative_change(current.costs, previous.costs);

    // Stored negated: falling costs read as an upward (good) trend.
    // Subtracting from 0.0 keeps an unchanged cost trend at +0.0.
    KpiMetric::new(
        KpiId::Costs,
        "Total Costs",
        current.costs,
        previous.costs,
        KpiUnit::Currency,
        0.0 - trend,
        costs_status(trend),
        "Sum of recorded expenses in the period",
    )
}

fn profit_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let profit = current.profit();
    let trend = relative_change_abs(profit, previous.profit());

    KpiMetric::new(
        KpiId::Profit,
        "Net Profit",
        profit,
        previous.profit(),
        KpiUnit::Currency,
        trend,
        profit_status(profit, trend),
        "Revenue minus costs in the period",
    )
}

fn margin_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let margin = current.margin();
    // Percentage points, not relative
    let trend = margin - previous.margin();

    KpiMetric::new(
        KpiId::Margin,
        "Profit Margin",
        margin,
        previous.margin(),
        KpiUnit::Percentage,
        trend,
        margin_status(margin),
        "Share of revenue retained as profit",
    )
    .with_target(MARGIN_TARGET)
}

fn client_diversity_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let count = current.client_count;
    let trend = relative_change(count as f64, previous.client_count as f64);
    let target = (thresholds::CLIENTS_GOOD as f64).max(count as f64 * 1.2);

    KpiMetric::new(
        KpiId::ClientDiversity,
        "Active Clients",
        count as f64,
        previous.client_count as f64,
        KpiUnit::Count,
        trend,
        client_diversity_status(count),
        "Distinct clients invoiced in the period",
    )
    .with_target(target)
}

fn avg_invoice_kpi(current: &WindowTotals, previous: &WindowTotals) -> KpiMetric {
    let trend = relative_change(current.avg_invoice(), previous.avg_invoice());

    KpiMetric::new(
        KpiId::AvgInvoice,
        "Average Invoice",
        current.avg_invoice(),
        previous.avg_invoice(),
        KpiUnit::Currency,
        trend,
        avg_invoice_status(trend),
        "Revenue divided by invoice count in the period",
    )
}

pub fn revenue_status(trend: f64) -> KpiStatus {
    if trend > 0.0 {
        KpiStatus::Good
    } else if trend < thresholds::REVENUE_CRITICAL_TREND {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

/// Classify cost health from the raw (not negated) cost trend
pub fn costs_status(raw_trend: f64) -> KpiStatus {
    if raw_trend < 0.0 {
        KpiStatus::Good
    } else if raw_trend > thresholds::COST_CRITICAL_TREND {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

pub fn profit_status(profit: f64, trend: f64) -> KpiStatus {
    if profit > 0.0 && trend > 0.0 {
        KpiStatus::Good
    } else if profit < 0.0 {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

pub fn margin_status(margin: f64) -> KpiStatus {
    if margin > thresholds::MARGIN_GOOD {
        KpiStatus::Good
    } else if margin < thresholds::MARGIN_CRITICAL {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

pub fn client_diversity_status(count: u32) -> KpiStatus {
    if count > thresholds::CLIENTS_GOOD {
        KpiStatus::Good
    } else if count < thresholds::CLIENTS_CRITICAL {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

pub fn avg_invoice_status(trend: f64) -> KpiStatus {
    if trend > 0.0 {
        KpiStatus::Good
    } else if trend < thresholds::AVG_INVOICE_CRITICAL_TREND {
        KpiStatus::Critical
    } else {
        KpiStatus::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{find_kpi, Trend};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(y: i32, m: u32, d: u32, amount: f64, client: &str) -> RevenueRecord {
        RevenueRecord::new(date(y, m, d), amount, "invoice").with_counterparty(client)
    }

    fn cost(y: i32, m: u32, d: u32, amount: f64) -> CostRecord {
        CostRecord::new(date(y, m, d), amount, "expense")
    }

    fn kpi(kpis: &[KpiMetric], id: KpiId) -> &KpiMetric {
        find_kpi(kpis, id).unwrap()
    }

    #[test]
    fn test_empty_input_returns_six_kpis() {
        let kpis = calculate_kpis(&[], &[], AnalysisPeriod::SixMonths, date(2024, 6, 1));

        let ids: Vec<KpiId> = kpis.iter().map(|k| k.id).collect();
        assert_eq!(ids, KpiId::ALL.to_vec());

        for k in &kpis {
            assert_eq!(k.value, 0.0);
            assert_eq!(k.previous_value, 0.0);
            assert_eq!(k.trend_percentage, 0.0);
            assert_eq!(k.trend, Trend::Stable);
            assert!(k.value.is_finite());
        }

        assert_eq!(kpi(&kpis, KpiId::Revenue).status, KpiStatus::Warning);
        assert_eq!(kpi(&kpis, KpiId::Costs).status, KpiStatus::Warning);
        assert_eq!(kpi(&kpis, KpiId::Profit).status, KpiStatus::Warning);
        assert_eq!(kpi(&kpis, KpiId::AvgInvoice).status, KpiStatus::Warning);
        // Zero margin and zero clients hit their critical branches
        assert_eq!(kpi(&kpis, KpiId::Margin).status, KpiStatus::Critical);
        assert_eq!(kpi(&kpis, KpiId::ClientDiversity).status, KpiStatus::Critical);
    }

    #[test]
    fn test_partition_boundary_three_months() {
        let revenue = vec![
            RevenueRecord::new(date(2024, 1, 15), 1000.0, "INV-1"),
            RevenueRecord::new(date(2024, 2, 15), 1500.0, "INV-2"),
        ];

        // Cutoff is 2023-12-01, so both invoices are in the current window
        let kpis = calculate_kpis(&revenue, &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let rev = kpi(&kpis, KpiId::Revenue);
        assert_eq!(rev.value, 2500.0);
        assert_eq!(rev.previous_value, 0.0);
        assert_eq!(rev.trend_percentage, 0.0);
    }

    #[test]
    fn test_record_on_cutoff_is_current() {
        let revenue = vec![
            RevenueRecord::new(date(2023, 12, 1), 100.0, "on cutoff"),
            RevenueRecord::new(date(2023, 11, 30), 40.0, "day before"),
        ];

        let kpis = calculate_kpis(&revenue, &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let rev = kpi(&kpis, KpiId::Revenue);
        assert_eq!(rev.value, 100.0);
        assert_eq!(rev.previous_value, 40.0);
        assert!((rev.trend_percentage - 150.0).abs() < 1e-9);
        assert_eq!(rev.trend, Trend::Up);
        assert_eq!(rev.status, KpiStatus::Good);
    }

    #[test]
    fn test_cost_trend_sign_is_inverted() {
        // Costs fall 20% from the previous window to the current one
        let costs = vec![cost(2023, 10, 1, 1000.0), cost(2024, 1, 1, 800.0)];
        let kpis = calculate_kpis(&[], &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let c = kpi(&kpis, KpiId::Costs);

        assert_eq!(c.value, 800.0);
        assert_eq!(c.previous_value, 1000.0);
        assert!((c.trend_percentage - 20.0).abs() < 1e-9);
        assert_eq!(c.trend, Trend::Up);
        assert_eq!(c.status, KpiStatus::Good);
    }

    #[test]
    fn test_cost_growth_is_critical_above_fifteen_percent() {
        let costs = vec![cost(2023, 10, 1, 1000.0), cost(2024, 1, 1, 1200.0)];
        let kpis = calculate_kpis(&[], &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let c = kpi(&kpis, KpiId::Costs);

        assert!((c.trend_percentage + 20.0).abs() < 1e-9);
        assert_eq!(c.trend, Trend::Down);
        assert_eq!(c.status, KpiStatus::Critical);
    }

    #[test]
    fn test_empty_kpis_serialize_positive_zero() {
        let kpis = calculate_kpis(&[], &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));

        for k in &kpis {
            assert!(k.value.is_sign_positive(), "{} value", k.id.as_str());
            assert!(k.previous_value.is_sign_positive(), "{} previous", k.id.as_str());
            assert!(k.trend_percentage.is_sign_positive(), "{} trend", k.id.as_str());
        }

        let json = serde_json::to_string(kpi(&kpis, KpiId::Costs)).unwrap();
        assert!(json.contains("\"value\":0.0"));
        assert!(json.contains("\"trend_percentage\":0.0"));
        assert!(!json.contains("-0.0"));
    }

    #[test]
    fn test_cost_kpi_without_previous_costs_is_positive_zero() {
        let costs = vec![cost(2024, 1, 1, 300.0)];
        let kpis = calculate_kpis(&[], &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));

        let json = serde_json::to_string(kpi(&kpis, KpiId::Costs)).unwrap();
        assert!(json.contains("\"previous_value\":0.0"));
        assert!(!json.contains("-0.0"));
    }

    #[test]
    fn test_revenue_trend_is_monotonic_in_current_revenue() {
        let now = date(2024, 3, 1);
        let mut last = f64::NEG_INFINITY;

        for current in [500.0, 900.0, 1000.0, 1500.0, 4000.0] {
            let revenue = vec![
                RevenueRecord::new(date(2023, 10, 1), 1000.0, "prev"),
                RevenueRecord::new(date(2024, 1, 1), current, "cur"),
            ];
            let kpis = calculate_kpis(&revenue, &[], AnalysisPeriod::ThreeMonths, now);
            let trend = kpi(&kpis, KpiId::Revenue).trend_percentage;
            assert!(trend > last);
            last = trend;
        }
    }

    #[test]
    fn test_profit_trend_uses_absolute_previous() {
        // Previous: 100 revenue, 300 costs => -200; current: 500 revenue, 400 costs => 100
        let revenue = vec![
            RevenueRecord::new(date(2023, 10, 1), 100.0, "prev"),
            RevenueRecord::new(date(2024, 1, 1), 500.0, "cur"),
        ];
        let costs = vec![cost(2023, 10, 1, 300.0), cost(2024, 1, 1, 400.0)];

        let kpis = calculate_kpis(&revenue, &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let p = kpi(&kpis, KpiId::Profit);
        assert_eq!(p.value, 100.0);
        assert_eq!(p.previous_value, -200.0);
        assert!((p.trend_percentage - 150.0).abs() < 1e-9);
        assert_eq!(p.status, KpiStatus::Good);
    }

    #[test]
    fn test_negative_profit_is_critical() {
        let revenue = vec![RevenueRecord::new(date(2024, 1, 1), 100.0, "cur")];
        let costs = vec![cost(2024, 1, 1, 300.0)];

        let kpis = calculate_kpis(&revenue, &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        assert_eq!(kpi(&kpis, KpiId::Profit).status, KpiStatus::Critical);
    }

    #[test]
    fn test_margin_trend_is_point_delta() {
        // Previous margin 50%, current margin 20%
        let revenue = vec![
            RevenueRecord::new(date(2023, 10, 1), 1000.0, "prev"),
            RevenueRecord::new(date(2024, 1, 1), 1000.0, "cur"),
        ];
        let costs = vec![cost(2023, 10, 1, 500.0), cost(2024, 1, 1, 800.0)];

        let kpis = calculate_kpis(&revenue, &costs, AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let m = kpi(&kpis, KpiId::Margin);
        assert!((m.value - 20.0).abs() < 1e-9);
        assert!((m.trend_percentage + 30.0).abs() < 1e-9);
        assert_eq!(m.target, Some(20.0));
    }

    #[test]
    fn test_margin_status_boundaries() {
        assert_eq!(margin_status(10.0), KpiStatus::Warning);
        assert_eq!(margin_status(9.99), KpiStatus::Critical);
        assert_eq!(margin_status(20.0), KpiStatus::Warning);
        assert_eq!(margin_status(20.01), KpiStatus::Good);
    }

    #[test]
    fn test_other_status_boundaries() {
        assert_eq!(revenue_status(0.0), KpiStatus::Warning);
        assert_eq!(revenue_status(-10.0), KpiStatus::Warning);
        assert_eq!(revenue_status(-10.01), KpiStatus::Critical);

        assert_eq!(costs_status(0.0), KpiStatus::Warning);
        assert_eq!(costs_status(15.0), KpiStatus::Warning);
        assert_eq!(costs_status(15.01), KpiStatus::Critical);

        assert_eq!(profit_status(0.0, 10.0), KpiStatus::Warning);
        assert_eq!(profit_status(10.0, 0.0), KpiStatus::Warning);

        assert_eq!(client_diversity_status(3), KpiStatus::Warning);
        assert_eq!(client_diversity_status(5), KpiStatus::Warning);
        assert_eq!(client_diversity_status(6), KpiStatus::Good);
        assert_eq!(client_diversity_status(2), KpiStatus::Critical);

        assert_eq!(avg_invoice_status(-15.0), KpiStatus::Warning);
        assert_eq!(avg_invoice_status(-15.01), KpiStatus::Critical);
        assert_eq!(avg_invoice_status(0.01), KpiStatus::Good);
    }

    #[test]
    fn test_client_diversity_target() {
        let revenue: Vec<RevenueRecord> = (0..10)
            .map(|i| invoice(2024, 1, 1, 100.0, &format!("client-{}", i)))
            .collect();

        let kpis = calculate_kpis(&revenue, &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let c = kpi(&kpis, KpiId::ClientDiversity);
        assert_eq!(c.value, 10.0);
        assert!((c.target.unwrap() - 12.0).abs() < 1e-9);
        assert_eq!(c.status, KpiStatus::Good);

        let few = vec![invoice(2024, 1, 1, 100.0, "solo")];
        let kpis = calculate_kpis(&few, &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        assert_eq!(kpi(&kpis, KpiId::ClientDiversity).target, Some(5.0));
    }

    #[test]
    fn test_avg_invoice_trend() {
        // Previous average 1000, current average 500
        let revenue = vec![
            invoice(2023, 10, 1, 1000.0, "a"),
            invoice(2024, 1, 1, 500.0, "a"),
            invoice(2024, 1, 2, 500.0, "b"),
        ];

        let kpis = calculate_kpis(&revenue, &[], AnalysisPeriod::ThreeMonths, date(2024, 3, 1));
        let avg = kpi(&kpis, KpiId::AvgInvoice);
        assert_eq!(avg.value, 500.0);
        assert_eq!(avg.previous_value, 1000.0);
        assert!((avg.trend_percentage + 50.0).abs() < 1e-9);
        assert_eq!(avg.status, KpiStatus::Critical);
    }
}
