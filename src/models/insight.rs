//! Business insight types
//!
//! Data structures for generated opportunities, risks, and trends.

use serde::{Deserialize, Serialize};

/// Kind of insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Something worth leaning into
    Opportunity,
    /// Something that needs attention
    Risk,
    /// A notable pattern in the data
    Trend,
}

impl InsightType {
    /// Get display label for the insight type
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opportunity => "Opportunity",
            Self::Risk => "Risk",
            Self::Trend => "Trend",
        }
    }
}

/// Expected business impact of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A single generated insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInsight {
    /// Id of the rule that produced the insight
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// Confidence level (0 - 100)
    pub confidence: u8,
    pub actionable: bool,
    /// Ordered remediation steps
    pub suggested_actions: Vec<String>,
}

impl BusinessInsight {
    /// Create a new actionable insight
    pub fn new(
        id: &str,
        insight_type: InsightType,
        title: String,
        description: String,
        impact: Impact,
        confidence: u8,
        suggested_actions: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            insight_type,
            title,
            description,
            impact,
            confidence: confidence.min(100),
            actionable: true,
            suggested_actions: suggested_actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Get confidence level as a descriptive string
    pub fn confidence_level(&self) -> &'static str {
        if self.confidence >= 80 {
            "High"
        } else if self.confidence >= 50 {
            "Medium"
        } else {
            "Low"
        }
    }
}
