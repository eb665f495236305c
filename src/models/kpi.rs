//! KPI data types
//!
//! Types for the six period-over-period financial KPIs

use serde::{Deserialize, Serialize};

/// Trend percentage beyond which a KPI counts as moving up or down
pub const TREND_THRESHOLD: f64 = 5.0;

/// Stable identifier of a KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KpiId {
    Revenue,
    Costs,
    Profit,
    Margin,
    ClientDiversity,
    AvgInvoice,
}

impl KpiId {
    /// All KPI ids in output order
    pub const ALL: [KpiId; 6] = [
        KpiId::Revenue,
        KpiId::Costs,
        KpiId::Profit,
        KpiId::Margin,
        KpiId::ClientDiversity,
        KpiId::AvgInvoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Costs => "costs",
            Self::Profit => "profit",
            Self::Margin => "margin",
            Self::ClientDiversity => "client-diversity",
            Self::AvgInvoice => "avg-invoice",
        }
    }
}

/// Unit a KPI value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiUnit {
    Currency,
    Percentage,
    Count,
}

/// Direction of a KPI compared with the previous window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classify a trend percentage
    pub fn from_percentage(pct: f64) -> Self {
        if pct > TREND_THRESHOLD {
            Trend::Up
        } else if pct < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// Health classification of a KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Good,
    Warning,
    Critical,
}

impl KpiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// A computed KPI for the current window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub id: KpiId,
    pub name: String,
    pub value: f64,
    pub previous_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub unit: KpiUnit,
    pub trend: Trend,
    pub trend_percentage: f64,
    pub status: KpiStatus,
    pub description: String,
}

impl KpiMetric {
    /// Create a KPI, deriving `trend` from `trend_percentage`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: KpiId,
        name: &str,
        value: f64,
        previous_value: f64,
        unit: KpiUnit,
        trend_percentage: f64,
        status: KpiStatus,
        description: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            value,
            previous_value,
            target: None,
            unit,
            trend: Trend::from_percentage(trend_percentage),
            trend_percentage,
            status,
            description: description.to_string(),
        }
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }
}

/// Look up a KPI by id
pub fn find_kpi(kpis: &[KpiMetric], id: KpiId) -> Option<&KpiMetric> {
    kpis.iter().find(|k| k.id == id)
}
