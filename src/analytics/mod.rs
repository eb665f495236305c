//! Analytics orchestration
//!
//! Loads a user's records from a [`RecordProvider`] and composes the KPI,
//! insight, and chart stages into one [`CompleteAnalytics`] response.

pub mod provider;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use provider::{InMemoryProvider, RecordProvider};

use crate::charts::{process_cost_data, process_profit_data, process_revenue_data};
use crate::config::AnalyticsConfig;
use crate::insights::generate_insights;
use crate::metrics::calculate_kpis;
use crate::models::{
    BusinessInsight, ChartAnalyticsData, CostRecord, KpiMetric, MonthlyBucket, ProfitBucket,
    RevenueRecord,
};
use crate::period::AnalysisPeriod;
use crate::AnalyticsError;

/// Everything the dashboard needs for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteAnalytics {
    pub kpis: Vec<KpiMetric>,
    pub insights: Vec<BusinessInsight>,
    pub revenue_data: ChartAnalyticsData<MonthlyBucket>,
    pub cost_data: ChartAnalyticsData<MonthlyBucket>,
    pub profit_data: ChartAnalyticsData<ProfitBucket>,
}

/// Compute analytics over records the caller already holds
///
/// Pure: the same records, period, and `now` always give the same result.
pub fn compute_analytics(
    revenue: &[RevenueRecord],
    costs: &[CostRecord],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> CompleteAnalytics {
    let kpis = calculate_kpis(revenue, costs, period, now.date_naive());
    let insights = generate_insights(&kpis, revenue, costs);

    CompleteAnalytics {
        revenue_data: process_revenue_data(revenue, period, now, config),
        cost_data: process_cost_data(costs, period, now, config),
        profit_data: process_profit_data(revenue, costs, period, now, config),
        kpis,
        insights,
    }
}

/// Analytics service over an injected record provider
pub struct AnalyticsService<P: RecordProvider> {
    provider: P,
    config: AnalyticsConfig,
}

impl<P: RecordProvider> AnalyticsService<P> {
    pub fn new(provider: P, config: AnalyticsConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analytics for a user as of the current instant
    pub fn get_complete_analytics(
        &self,
        user_id: &str,
        period: AnalysisPeriod,
    ) -> Result<CompleteAnalytics, AnalyticsError> {
        self.get_complete_analytics_at(user_id, period, Utc::now())
    }

    /// Analytics for a user as of `now`
    pub fn get_complete_analytics_at(
        &self,
        user_id: &str,
        period: AnalysisPeriod,
        now: DateTime<Utc>,
    ) -> Result<CompleteAnalytics, AnalyticsError> {
        tracing::debug!(user_id, period = period.as_str(), "Analytics requested");

        let revenue = self.provider.revenue_records(user_id).map_err(|e| {
            tracing::warn!(user_id, error = %e, "Failed to load revenue records");
            e
        })?;
        let costs = self.provider.cost_records(user_id).map_err(|e| {
            tracing::warn!(user_id, error = %e, "Failed to load cost records");
            e
        })?;

        let analytics = compute_analytics(&revenue, &costs, period, now, &self.config);

        tracing::info!(
            user_id,
            period = period.as_str(),
            revenue_records = revenue.len(),
            cost_records = costs.len(),
            insights = analytics.insights.len(),
            "Analytics computed"
        );

        Ok(analytics)
    }
}
