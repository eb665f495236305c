//! JSON export functionality
//!
//! Wraps the complete analytics response in a dated, versioned envelope.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analytics::CompleteAnalytics;
use crate::AnalyticsError;

pub const EXPORT_VERSION: &str = "1.0.0";

/// Complete export structure for JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsExportJson {
    pub export_date: String,
    pub export_version: String,
    pub analytics: CompleteAnalytics,
}

/// Write the complete analytics to a pretty-printed JSON file
pub fn write_analytics_json(
    analytics: &CompleteAnalytics,
    path: &Path,
) -> Result<(), AnalyticsError> {
    let export = AnalyticsExportJson {
        export_date: chrono::Utc::now().to_rfc3339(),
        export_version: EXPORT_VERSION.to_string(),
        analytics: analytics.clone(),
    };

    let json = serde_json::to_string_pretty(&export)?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::debug!(path = ?path, bytes = json.len(), "JSON export written");
    Ok(())
}
