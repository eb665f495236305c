//! Chart series processing
//!
//! Buckets raw records into zero-filled monthly series for revenue, costs,
//! and profit, plus the top cost categories.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::monthly::{month_key, month_label, month_range};
use crate::config::AnalyticsConfig;
use crate::models::{
    CategoryBucket, ChartAnalyticsData, ChartMetadata, CostRecord, FinancialRecord,
    MonthlyBucket, ProfitBucket, RevenueRecord,
};
use crate::period::AnalysisPeriod;

/// Number of cost categories kept in the secondary series
pub const TOP_COST_CATEGORIES: usize = 10;

/// Build metadata for a chart generated at `now`
pub fn chart_metadata(
    period: AnalysisPeriod,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> ChartMetadata {
    ChartMetadata {
        period: period.label(),
        currency: config.currency.clone(),
        generated_at: now.to_rfc3339(),
        data_source: config.data_source.clone(),
    }
}

/// Sum records into one bucket per month of the period, oldest first
///
/// Months without records are kept with zero value and count.
pub fn bucket_by_month<R: FinancialRecord>(
    records: &[R],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = month_range(now.date_naive(), period.months())
        .into_iter()
        .map(|m| MonthlyBucket::new(month_key(m), month_label(m)))
        .collect();

    let index: HashMap<String, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.clone(), i))
        .collect();

    for record in records {
        if let Some(&i) = index.get(&month_key(record.date())) {
            buckets[i].add(record.amount());
        }
    }

    buckets
}

/// Monthly revenue series
pub fn process_revenue_data(
    revenue: &[RevenueRecord],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> ChartAnalyticsData<MonthlyBucket> {
    ChartAnalyticsData {
        primary: bucket_by_month(revenue, period, now),
        secondary: None,
        metadata: chart_metadata(period, now, config),
    }
}

/// Monthly cost series with the top cost categories as the secondary series
pub fn process_cost_data(
    costs: &[CostRecord],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> ChartAnalyticsData<MonthlyBucket> {
    ChartAnalyticsData {
        primary: bucket_by_month(costs, period, now),
        secondary: Some(top_cost_categories(costs, TOP_COST_CATEGORIES)),
        metadata: chart_metadata(period, now, config),
    }
}

/// Monthly profit series with revenue, costs, and margin per month
pub fn process_profit_data(
    revenue: &[RevenueRecord],
    costs: &[CostRecord],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> ChartAnalyticsData<ProfitBucket> {
    let revenue_buckets = bucket_by_month(revenue, period, now);
    let cost_buckets = bucket_by_month(costs, period, now);

    let primary = revenue_buckets
        .into_iter()
        .zip(cost_buckets)
        .map(|(rev, cost)| {
            let profit = rev.value - cost.value;
            let margin = if rev.value == 0.0 {
                0.0
            } else {
                profit / rev.value * 100.0
            };

            ProfitBucket {
                id: rev.id,
                name: rev.name,
                date: rev.date,
                value: profit,
                count: rev.count + cost.count,
                revenue: rev.value,
                costs: cost.value,
                margin,
            }
        })
        .collect();

    ChartAnalyticsData {
        primary,
        secondary: None,
        metadata: chart_metadata(period, now, config),
    }
}

/// Group costs by exact description, largest total first, keeping at most `limit`
pub fn top_cost_categories(costs: &[CostRecord], limit: usize) -> Vec<CategoryBucket> {
    let mut groups: HashMap<&str, CategoryBucket> = HashMap::new();

    for cost in costs {
        let bucket = groups.entry(cost.description.as_str()).or_insert_with(|| CategoryBucket {
            id: cost.description.clone(),
            name: cost.description.clone(),
            value: 0.0,
            count: 0,
        });
        bucket.value += cost.amount;
        bucket.count += 1;
    }

    let mut categories: Vec<CategoryBucket> = groups.into_values().collect();

    // Ties broken by name so output does not depend on hash order
    categories.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    categories.truncate(limit);

    categories
}
