//! Export module for CSV and JSON export functionality
//!
//! Writes computed analytics to disk: the full response as JSON, and the
//! monthly series and KPI list as flat CSV tables. [`export_analytics`]
//! picks the writers for a format.

pub mod csv_export;
pub mod json_export;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::CompleteAnalytics;
use crate::models::{KpiMetric, KpiUnit, Trend};
use crate::AnalyticsError;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(AnalyticsError::Export(format!(
                "Invalid export format: {}. Use 'csv' or 'json'",
                s
            ))),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat KPI row for CSV output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportableKpi {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub previous_value: f64,
    pub target: Option<f64>,
    pub unit: String,
    pub trend: String,
    pub trend_percentage: f64,
    pub status: String,
}

impl From<&KpiMetric> for ExportableKpi {
    fn from(kpi: &KpiMetric) -> Self {
        let unit = match kpi.unit {
            KpiUnit::Currency => "currency",
            KpiUnit::Percentage => "percentage",
            KpiUnit::Count => "count",
        };
        let trend = match kpi.trend {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };

        Self {
            id: kpi.id.as_str().to_string(),
            name: kpi.name.clone(),
            value: kpi.value,
            previous_value: kpi.previous_value,
            target: kpi.target,
            unit: unit.to_string(),
            trend: trend.to_string(),
            trend_percentage: kpi.trend_percentage,
            status: kpi.status.as_str().to_string(),
        }
    }
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, format: ExportFormat) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, format.extension())
}

/// Export analytics in `format` into `dir`, or the default export directory
///
/// JSON produces one file with the whole response. CSV produces one table each
/// for KPIs, revenue, costs, and profit. Returns the paths written.
pub fn export_analytics(
    analytics: &CompleteAnalytics,
    format: ExportFormat,
    dir: Option<&Path>,
) -> Result<Vec<PathBuf>, AnalyticsError> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(get_export_directory);
    std::fs::create_dir_all(&dir)?;

    let paths = match format {
        ExportFormat::Json => {
            let path = dir.join(generate_export_filename("analytics", format));
            write_analytics_json(analytics, &path)?;
            vec![path]
        }
        ExportFormat::Csv => {
            let kpis = dir.join(generate_export_filename("kpis", format));
            let revenue = dir.join(generate_export_filename("revenue", format));
            let costs = dir.join(generate_export_filename("costs", format));
            let profit = dir.join(generate_export_filename("profit", format));

            write_kpis_csv(&analytics.kpis, &kpis)?;
            write_monthly_csv(&analytics.revenue_data.primary, &revenue)?;
            write_monthly_csv(&analytics.cost_data.primary, &costs)?;
            write_profit_csv(&analytics.profit_data.primary, &profit)?;
            vec![kpis, revenue, costs, profit]
        }
    };

    tracing::info!(
        format = format.extension(),
        files = paths.len(),
        dir = ?dir,
        "Analytics exported"
    );
    Ok(paths)
}

pub use csv_export::{write_kpis_csv, write_monthly_csv, write_profit_csv};
pub use json_export::{write_analytics_json, AnalyticsExportJson, EXPORT_VERSION};
