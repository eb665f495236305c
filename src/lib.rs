//! Finsight - financial analytics engine
//!
//! This library turns revenue and cost records into dashboard-ready analytics.
//! It handles:
//! - Period-over-period KPI calculation with health status
//! - Rule-based business insights
//! - Zero-filled monthly chart series and top cost categories
//! - SQLite record storage
//! - CSV and JSON export

pub mod analytics;
pub mod charts;
pub mod config;
pub mod db;
pub mod export;
pub mod insights;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod period;

pub use analytics::{
    compute_analytics, AnalyticsService, CompleteAnalytics, InMemoryProvider, RecordProvider,
};
pub use config::AnalyticsConfig;
pub use models::{BusinessInsight, CostRecord, KpiMetric, RevenueRecord};
pub use period::AnalysisPeriod;

/// Error type for boundary operations
///
/// Computation itself never fails; only loading, parsing, and writing do.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Serialize as the display string so errors can cross a JSON boundary
impl serde::Serialize for AnalyticsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
