//! Data models module
//!
//! Contains all data structures used throughout the crate:
//! - Raw revenue and cost records
//! - KPI types
//! - Business insight types
//! - Chart series types

pub mod chart;
pub mod insight;
pub mod kpi;
pub mod record;

pub use chart::{
    BucketValue, CategoryBucket, ChartAnalyticsData, ChartMetadata, MonthlyBucket, ProfitBucket,
};
pub use insight::{BusinessInsight, Impact, InsightType};
pub use kpi::{find_kpi, KpiId, KpiMetric, KpiStatus, KpiUnit, Trend};
pub use record::{CostRecord, FinancialRecord, RevenueRecord};
