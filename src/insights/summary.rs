//! Insight summary
//!
//! Aggregate counts over a generated insight list. The list itself keeps
//! rule order.

use serde::{Deserialize, Serialize};

use crate::models::{BusinessInsight, Impact, InsightType};

/// Summary of a set of insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    /// Insights in the order their rules fired
    pub insights: Vec<BusinessInsight>,
    pub opportunity_count: u32,
    pub risk_count: u32,
    pub trend_count: u32,
    pub high_impact_count: u32,
    /// Average confidence across all insights (0 - 100)
    pub avg_confidence: f64,
}

impl InsightSummary {
    /// Create a new summary from a list of insights
    pub fn from_insights(insights: Vec<BusinessInsight>) -> Self {
        let count_type =
            |t: InsightType| insights.iter().filter(|i| i.insight_type == t).count() as u32;

        let opportunity_count = count_type(InsightType::Opportunity);
        let risk_count = count_type(InsightType::Risk);
        let trend_count = count_type(InsightType::Trend);

        let high_impact_count = insights
            .iter()
            .filter(|i| i.impact == Impact::High)
            .count() as u32;

        let avg_confidence = if insights.is_empty() {
            0.0
        } else {
            insights.iter().map(|i| i.confidence as f64).sum::<f64>() / insights.len() as f64
        };

        Self {
            insights,
            opportunity_count,
            risk_count,
            trend_count,
            high_impact_count,
            avg_confidence,
        }
    }

    /// Keep insights at or above a confidence level
    pub fn with_min_confidence(mut self, min_confidence: u8) -> Self {
        self.insights.retain(|i| i.confidence >= min_confidence);
        Self::from_insights(self.insights)
    }

    /// Keep insights of the given types
    pub fn with_types(mut self, types: &[InsightType]) -> Self {
        self.insights.retain(|i| types.contains(&i.insight_type));
        Self::from_insights(self.insights)
    }
}
