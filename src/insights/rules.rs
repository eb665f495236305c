//! Insight rules
//!
//! Each `check_*` function inspects the KPIs (and for two rules the raw
//! records) and returns an insight only when its guard holds.

use super::engine::RuleContext;
use super::seasonality::{month_name, monthly_coefficient_of_variation, peak_and_trough};
use crate::models::{BusinessInsight, CostRecord, Impact, InsightType, KpiId};

/// Thresholds for insight triggers
pub mod thresholds {
    /// Revenue trend above this is a growth opportunity
    pub const REVENUE_GROWTH: f64 = 20.0;
    /// Revenue trend below this is a decline risk
    pub const REVENUE_DECLINE: f64 = -15.0;
    /// Fewer active clients than this is a concentration risk
    pub const MIN_CLIENTS: f64 = 3.0;
    /// Margin below this is a risk
    pub const LOW_MARGIN: f64 = 10.0;
    /// Margin above this is an opportunity
    pub const HIGH_MARGIN: f64 = 35.0;
    /// Average invoice trend below this is a declining trend
    pub const INVOICE_VALUE_DECLINE: f64 = -20.0;
    /// Minimum invoices before seasonality is assessed
    pub const MIN_SEASONAL_RECORDS: usize = 12;
    /// Calendar-month coefficient of variation above this is volatile
    pub const SEASONAL_VOLATILITY: f64 = 0.4;
    /// Costs above this share of revenue are a risk
    pub const HIGH_COST_RATIO: f64 = 0.7;
}

/// Check for strong revenue growth
pub fn check_revenue_growth(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let revenue = ctx.kpi(KpiId::Revenue)?;
    if revenue.trend_percentage <= thresholds::REVENUE_GROWTH {
        return None;
    }

    Some(BusinessInsight::new(
        "revenue-growth-opportunity",
        InsightType::Opportunity,
        "Strong revenue growth".to_string(),
        format!(
            "Revenue grew {:.1}% compared with the previous period. \
            This is a good moment to invest in capacity and lock in demand.",
            revenue.trend_percentage
        ),
        Impact::High,
        95,
        &[
            "Identify which clients and services drove the growth",
            "Consider raising prices on high-demand services",
            "Plan capacity so delivery quality keeps pace with demand",
            "Reinvest part of the additional revenue in marketing",
        ],
    ))
}

/// Check for a significant revenue decline
pub fn check_revenue_decline(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let revenue = ctx.kpi(KpiId::Revenue)?;
    if revenue.trend_percentage >= thresholds::REVENUE_DECLINE {
        return None;
    }

    Some(BusinessInsight::new(
        "revenue-decline-risk",
        InsightType::Risk,
        "Revenue is declining".to_string(),
        format!(
            "Revenue fell {:.1}% compared with the previous period. \
            Left unchecked this will squeeze cash flow and profit.",
            revenue.trend_percentage.abs()
        ),
        Impact::High,
        90,
        &[
            "Contact recent clients to understand reduced demand",
            "Review the sales pipeline for stalled opportunities",
            "Launch a targeted campaign for existing clients",
            "Cut discretionary costs until revenue recovers",
        ],
    ))
}

/// Check for dependence on too few clients
pub fn check_client_concentration(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let clients = ctx.kpi(KpiId::ClientDiversity)?;
    let revenue = ctx.kpi(KpiId::Revenue)?;

    // An empty window has no clients to be concentrated on
    let has_activity = revenue.value > 0.0 || clients.value > 0.0;
    if !has_activity || clients.value >= thresholds::MIN_CLIENTS {
        return None;
    }

    Some(BusinessInsight::new(
        "client-concentration-risk",
        InsightType::Risk,
        "Revenue depends on few clients".to_string(),
        format!(
            "Only {} active client(s) generated revenue in this period. \
            Losing one of them would have a large impact on the business.",
            clients.value as u32
        ),
        Impact::High,
        85,
        &[
            "Set a target for new client acquisition",
            "Ask existing clients for referrals",
            "Diversify services to reach new market segments",
            "Negotiate longer contracts with key clients",
        ],
    ))
}

/// Check for a thin profit margin
pub fn check_low_margin(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let margin = ctx.kpi(KpiId::Margin)?;
    let revenue = ctx.kpi(KpiId::Revenue)?;

    // Margin is undefined without revenue
    if revenue.value <= 0.0 || margin.value >= thresholds::LOW_MARGIN {
        return None;
    }

    Some(BusinessInsight::new(
        "low-margin-risk",
        InsightType::Risk,
        "Profit margin is too low".to_string(),
        format!(
            "The profit margin is {:.1}%, below the {:.0}% safety threshold. \
            Small cost increases could turn the business unprofitable.",
            margin.value,
            thresholds::LOW_MARGIN
        ),
        Impact::High,
        95,
        &[
            "Review pricing against the cost of delivery",
            "Identify and reduce the largest expense categories",
            "Drop or reprice low-margin services",
            "Renegotiate supplier contracts",
        ],
    ))
}

/// Check for an unusually healthy margin
pub fn check_high_margin(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let margin = ctx.kpi(KpiId::Margin)?;
    if margin.value <= thresholds::HIGH_MARGIN {
        return None;
    }

    Some(BusinessInsight::new(
        "high-margin-opportunity",
        InsightType::Opportunity,
        "Excellent profit margin".to_string(),
        format!(
            "The profit margin is {:.1}%, well above average. \
            There is room to invest in growth without endangering profitability.",
            margin.value
        ),
        Impact::Medium,
        90,
        &[
            "Invest in marketing to attract new clients",
            "Build a cash reserve for slower periods",
            "Consider expanding the team or service offering",
        ],
    ))
}

/// Check for shrinking invoice amounts
pub fn check_declining_invoice_value(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let avg = ctx.kpi(KpiId::AvgInvoice)?;

    if avg.previous_value <= 0.0 || avg.trend_percentage >= thresholds::INVOICE_VALUE_DECLINE {
        return None;
    }

    Some(BusinessInsight::new(
        "declining-invoice-value",
        InsightType::Trend,
        "Average invoice value is falling".to_string(),
        format!(
            "The average invoice dropped {:.1}% compared with the previous period. \
            Smaller jobs or discounting may be eroding revenue per client.",
            avg.trend_percentage.abs()
        ),
        Impact::Medium,
        80,
        &[
            "Check whether discounts are being applied too often",
            "Offer bundled services to increase order size",
            "Focus sales effort on higher-value engagements",
        ],
    ))
}

/// Check for strong seasonal swings in revenue
pub fn check_seasonal_volatility(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    if ctx.revenue.len() < thresholds::MIN_SEASONAL_RECORDS {
        return None;
    }

    let cov = monthly_coefficient_of_variation(ctx.revenue)?;
    if cov <= thresholds::SEASONAL_VOLATILITY {
        return None;
    }

    let (peak, trough) = peak_and_trough(ctx.revenue);

    Some(BusinessInsight::new(
        "seasonal-volatility",
        InsightType::Trend,
        "Revenue is strongly seasonal".to_string(),
        format!(
            "Monthly revenue varies by {:.0}% around its average, peaking in {} \
            and bottoming out in {}. Plan cash flow around the slow months.",
            cov * 100.0,
            month_name(peak),
            month_name(trough)
        ),
        Impact::Medium,
        85,
        &[
            "Build a cash reserve during peak months",
            "Schedule promotions ahead of the slow season",
            "Offer retainers or subscriptions to smooth income",
            "Plan large expenses for high-revenue months",
        ],
    ))
}

/// Check total costs against total revenue
pub fn check_high_cost_ratio(ctx: &RuleContext<'_>) -> Option<BusinessInsight> {
    let total_revenue = ctx.revenue.iter().fold(0.0, |acc, r| acc + r.amount);
    if total_revenue <= 0.0 {
        return None;
    }

    let total_costs = ctx.costs.iter().fold(0.0, |acc, c| acc + c.amount);
    let ratio = total_costs / total_revenue;
    if ratio <= thresholds::HIGH_COST_RATIO {
        return None;
    }

    let largest = largest_cost(ctx.costs)?;

    Some(BusinessInsight::new(
        "high-cost-ratio",
        InsightType::Risk,
        "Costs consume most of the revenue".to_string(),
        format!(
            "Costs amount to {:.1}% of revenue. The largest single expense is \
            \"{}\" at {:.2}.",
            ratio * 100.0,
            largest.description,
            largest.amount
        ),
        Impact::High,
        90,
        &[
            "Start with a review of the largest expense",
            "Cancel subscriptions and services that are no longer used",
            "Compare supplier prices and renegotiate contracts",
            "Set a monthly budget per cost category",
            "Track costs against revenue every month",
        ],
    ))
}

/// Largest cost record by amount; the first one wins ties
pub fn largest_cost(costs: &[CostRecord]) -> Option<&CostRecord> {
    costs.iter().fold(None, |best: Option<&CostRecord>, cost| match best {
        Some(b) if b.amount >= cost.amount => Some(b),
        _ => Some(cost),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KpiMetric, KpiStatus, KpiUnit, RevenueRecord};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn metric(id: KpiId, value: f64, previous: f64, trend: f64) -> KpiMetric {
        KpiMetric::new(id, "", value, previous, KpiUnit::Currency, trend, KpiStatus::Warning, "")
    }

    /// Neutral KPIs that fire no rule
    fn neutral_kpis() -> Vec<KpiMetric> {
        vec![
            metric(KpiId::Revenue, 10_000.0, 10_000.0, 0.0),
            metric(KpiId::Costs, 7_000.0, 7_000.0, 0.0),
            metric(KpiId::Profit, 3_000.0, 3_000.0, 0.0),
            metric(KpiId::Margin, 30.0, 30.0, 0.0),
            metric(KpiId::ClientDiversity, 6.0, 6.0, 0.0),
            metric(KpiId::AvgInvoice, 1_000.0, 1_000.0, 0.0),
        ]
    }

    fn with(kpis: &mut [KpiMetric], id: KpiId, f: impl FnOnce(&mut KpiMetric)) {
        if let Some(k) = kpis.iter_mut().find(|k| k.id == id) {
            f(k);
        }
    }

    #[test]
    fn test_neutral_kpis_fire_nothing() {
        let kpis = neutral_kpis();
        let ctx = RuleContext::new(&kpis, &[], &[]);

        assert!(check_revenue_growth(&ctx).is_none());
        assert!(check_revenue_decline(&ctx).is_none());
        assert!(check_client_concentration(&ctx).is_none());
        assert!(check_low_margin(&ctx).is_none());
        assert!(check_high_margin(&ctx).is_none());
        assert!(check_declining_invoice_value(&ctx).is_none());
        assert!(check_seasonal_volatility(&ctx).is_none());
        assert!(check_high_cost_ratio(&ctx).is_none());
    }

    #[test]
    fn test_revenue_growth_threshold() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Revenue, |k| k.trend_percentage = 20.0);
        assert!(check_revenue_growth(&RuleContext::new(&kpis, &[], &[])).is_none());

        with(&mut kpis, KpiId::Revenue, |k| k.trend_percentage = 25.0);
        let insight = check_revenue_growth(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.insight_type, InsightType::Opportunity);
        assert_eq!(insight.impact, Impact::High);
        assert_eq!(insight.confidence, 95);
        assert!(insight.description.contains("25.0%"));
    }

    #[test]
    fn test_revenue_decline_threshold() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Revenue, |k| k.trend_percentage = -15.0);
        assert!(check_revenue_decline(&RuleContext::new(&kpis, &[], &[])).is_none());

        with(&mut kpis, KpiId::Revenue, |k| k.trend_percentage = -30.0);
        let insight = check_revenue_decline(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.id, "revenue-decline-risk");
        assert_eq!(insight.confidence, 90);
        assert!(insight.description.contains("30.0%"));
    }

    #[test]
    fn test_client_concentration_boundary() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::ClientDiversity, |k| k.value = 3.0);
        assert!(check_client_concentration(&RuleContext::new(&kpis, &[], &[])).is_none());

        with(&mut kpis, KpiId::ClientDiversity, |k| k.value = 2.0);
        let insight = check_client_concentration(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.insight_type, InsightType::Risk);
        assert_eq!(insight.confidence, 85);
        assert!(insight.description.contains("Only 2"));
    }

    #[test]
    fn test_client_concentration_with_zero_amount_invoices() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Revenue, |k| k.value = 0.0);
        with(&mut kpis, KpiId::ClientDiversity, |k| k.value = 2.0);
        let insight = check_client_concentration(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.id, "client-concentration-risk");

        // No revenue and no clients is an empty window
        with(&mut kpis, KpiId::ClientDiversity, |k| k.value = 0.0);
        assert!(check_client_concentration(&RuleContext::new(&kpis, &[], &[])).is_none());
    }

    #[test]
    fn test_low_margin_requires_revenue() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Margin, |k| k.value = 5.0);
        let insight = check_low_margin(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.confidence, 95);

        with(&mut kpis, KpiId::Revenue, |k| k.value = 0.0);
        assert!(check_low_margin(&RuleContext::new(&kpis, &[], &[])).is_none());
    }

    #[test]
    fn test_low_margin_boundary() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Margin, |k| k.value = 10.0);
        assert!(check_low_margin(&RuleContext::new(&kpis, &[], &[])).is_none());
    }

    #[test]
    fn test_high_margin() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::Margin, |k| k.value = 35.0);
        assert!(check_high_margin(&RuleContext::new(&kpis, &[], &[])).is_none());

        with(&mut kpis, KpiId::Margin, |k| k.value = 42.0);
        let insight = check_high_margin(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.impact, Impact::Medium);
        assert_eq!(insight.suggested_actions.len(), 3);
    }

    #[test]
    fn test_declining_invoice_value() {
        let mut kpis = neutral_kpis();
        with(&mut kpis, KpiId::AvgInvoice, |k| k.trend_percentage = -25.0);
        let insight =
            check_declining_invoice_value(&RuleContext::new(&kpis, &[], &[])).unwrap();
        assert_eq!(insight.insight_type, InsightType::Trend);
        assert_eq!(insight.confidence, 80);

        // No previous average means no trend to speak of
        with(&mut kpis, KpiId::AvgInvoice, |k| k.previous_value = 0.0);
        assert!(check_declining_invoice_value(&RuleContext::new(&kpis, &[], &[])).is_none());
    }

    #[test]
    fn test_seasonal_volatility_needs_twelve_records() {
        let kpis = neutral_kpis();
        let mut revenue: Vec<RevenueRecord> = (1..=11)
            .map(|_| RevenueRecord::new(date(2023, 12, 1), 500.0, "inv"))
            .collect();
        assert!(check_seasonal_volatility(&RuleContext::new(&kpis, &revenue, &[])).is_none());

        revenue.push(RevenueRecord::new(date(2023, 12, 2), 500.0, "inv"));
        let insight =
            check_seasonal_volatility(&RuleContext::new(&kpis, &revenue, &[])).unwrap();
        assert_eq!(insight.id, "seasonal-volatility");
        assert!(insight.description.contains("December"));
    }

    #[test]
    fn test_seasonal_volatility_ignores_even_revenue() {
        let kpis = neutral_kpis();
        let revenue: Vec<RevenueRecord> = (1..=12)
            .map(|m| RevenueRecord::new(date(2023, m, 1), 500.0, "inv"))
            .collect();
        assert!(check_seasonal_volatility(&RuleContext::new(&kpis, &revenue, &[])).is_none());
    }

    #[test]
    fn test_high_cost_ratio_boundary() {
        let kpis = neutral_kpis();
        let revenue = vec![RevenueRecord::new(date(2024, 1, 1), 1000.0, "inv")];

        let at_limit = vec![CostRecord::new(date(2024, 1, 1), 700.0, "Rent")];
        assert!(check_high_cost_ratio(&RuleContext::new(&kpis, &revenue, &at_limit)).is_none());

        let above = vec![
            CostRecord::new(date(2024, 1, 1), 500.0, "Rent"),
            CostRecord::new(date(2024, 1, 2), 210.0, "Software"),
        ];
        let insight =
            check_high_cost_ratio(&RuleContext::new(&kpis, &revenue, &above)).unwrap();
        assert_eq!(insight.impact, Impact::High);
        assert!(insight.description.contains("71.0%"));
        assert!(insight.description.contains("\"Rent\""));
        assert_eq!(insight.suggested_actions.len(), 5);
    }

    #[test]
    fn test_high_cost_ratio_without_revenue() {
        let kpis = neutral_kpis();
        let costs = vec![CostRecord::new(date(2024, 1, 1), 700.0, "Rent")];
        assert!(check_high_cost_ratio(&RuleContext::new(&kpis, &[], &costs)).is_none());
    }

    #[test]
    fn test_largest_cost() {
        let costs = vec![
            CostRecord::new(date(2024, 1, 1), 100.0, "A"),
            CostRecord::new(date(2024, 1, 1), 300.0, "B"),
            CostRecord::new(date(2024, 1, 1), 300.0, "C"),
        ];
        assert_eq!(largest_cost(&costs).unwrap().description, "B");
        assert!(largest_cost(&[]).is_none());
    }
}
