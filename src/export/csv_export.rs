//! CSV export functionality
//!
//! Provides CSV serialization for monthly series and KPIs.

use std::path::Path;

use csv::Writer;
use serde::Serialize;

use super::ExportableKpi;
use crate::models::{KpiMetric, MonthlyBucket, ProfitBucket};
use crate::AnalyticsError;

fn write_rows<T: Serialize>(
    rows: impl IntoIterator<Item = T>,
    path: &Path,
) -> Result<usize, AnalyticsError> {
    let mut writer = Writer::from_path(path)?;
    let mut written = 0;

    for row in rows {
        writer.serialize(row)?;
        written += 1;
    }

    writer.flush()?;
    tracing::debug!(path = ?path, rows = written, "CSV export written");
    Ok(written)
}

/// Write a monthly revenue or cost series
pub fn write_monthly_csv(buckets: &[MonthlyBucket], path: &Path) -> Result<usize, AnalyticsError> {
    write_rows(buckets, path)
}

/// Write a monthly profit series
pub fn write_profit_csv(buckets: &[ProfitBucket], path: &Path) -> Result<usize, AnalyticsError> {
    write_rows(buckets, path)
}

/// Write KPIs, one row per metric
pub fn write_kpis_csv(kpis: &[KpiMetric], path: &Path) -> Result<usize, AnalyticsError> {
    write_rows(kpis.iter().map(ExportableKpi::from), path)
}
