//! Analytics configuration
//!
//! Settings that shape the output but never the computation: the currency
//! code and data source label attached to chart metadata, and the log level.

use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// Analytics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// ISO 4217 currency code reported in chart metadata
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Label describing where records came from
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Maximum log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_data_source() -> String {
    "financial-records".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            data_source: default_data_source(),
            log_level: default_log_level(),
        }
    }
}

impl AnalyticsConfig {
    /// Read settings from `FINSIGHT_CURRENCY`, `FINSIGHT_DATA_SOURCE`, and
    /// `FINSIGHT_LOG_LEVEL`, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            currency: std::env::var("FINSIGHT_CURRENCY").unwrap_or_else(|_| default_currency()),
            data_source: std::env::var("FINSIGHT_DATA_SOURCE")
                .unwrap_or_else(|_| default_data_source()),
            log_level: std::env::var("FINSIGHT_LOG_LEVEL")
                .unwrap_or_else(|_| default_log_level()),
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, AnalyticsError> {
        Ok(serde_json::from_str(json)?)
    }
}
