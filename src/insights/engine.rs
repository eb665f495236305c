//! Insight engine
//!
//! Evaluates an ordered table of independent rules against the KPIs and raw
//! records. Every rule is evaluated; each one that fires appends one insight,
//! so the output follows table order rather than severity.

use super::rules;
use crate::models::{find_kpi, BusinessInsight, CostRecord, KpiId, KpiMetric, RevenueRecord};

/// Everything a rule may inspect
pub struct RuleContext<'a> {
    pub kpis: &'a [KpiMetric],
    pub revenue: &'a [RevenueRecord],
    pub costs: &'a [CostRecord],
}

impl<'a> RuleContext<'a> {
    pub fn new(
        kpis: &'a [KpiMetric],
        revenue: &'a [RevenueRecord],
        costs: &'a [CostRecord],
    ) -> Self {
        Self { kpis, revenue, costs }
    }

    /// Look up a KPI by id
    pub fn kpi(&self, id: KpiId) -> Option<&'a KpiMetric> {
        find_kpi(self.kpis, id)
    }
}

/// A named guard-and-factory pair; returns `None` when the rule does not fire
#[derive(Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub evaluate: fn(&RuleContext<'_>) -> Option<BusinessInsight>,
}

impl std::fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightRule").field("id", &self.id).finish()
    }
}

/// The built-in rule table, in evaluation order
pub fn default_rules() -> Vec<InsightRule> {
    vec![
        InsightRule {
            id: "revenue-growth-opportunity",
            evaluate: rules::check_revenue_growth,
        },
        InsightRule {
            id: "revenue-decline-risk",
            evaluate: rules::check_revenue_decline,
        },
        InsightRule {
            id: "client-concentration-risk",
            evaluate: rules::check_client_concentration,
        },
        InsightRule {
            id: "low-margin-risk",
            evaluate: rules::check_low_margin,
        },
        InsightRule {
            id: "high-margin-opportunity",
            evaluate: rules::check_high_margin,
        },
        InsightRule {
            id: "declining-invoice-value",
            evaluate: rules::check_declining_invoice_value,
        },
        InsightRule {
            id: "seasonal-volatility",
            evaluate: rules::check_seasonal_volatility,
        },
        InsightRule {
            id: "high-cost-ratio",
            evaluate: rules::check_high_cost_ratio,
        },
    ]
}

/// Ordered rule evaluator
#[derive(Debug, Clone)]
pub struct InsightEngine {
    rules: Vec<InsightRule>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Create an engine with a custom rule table
    pub fn with_rules(rules: Vec<InsightRule>) -> Self {
        Self { rules }
    }

    /// Ids of the registered rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    /// Evaluate every rule and collect the insights that fired
    pub fn generate(&self, ctx: &RuleContext<'_>) -> Vec<BusinessInsight> {
        let mut insights = Vec::new();

        for rule in &self.rules {
            if let Some(insight) = (rule.evaluate)(ctx) {
                tracing::debug!(
                    rule = rule.id,
                    confidence = insight.confidence,
                    "Insight rule fired"
                );
                insights.push(insight);
            }
        }

        insights
    }
}

/// Generate insights with the built-in rules
pub fn generate_insights(
    kpis: &[KpiMetric],
    revenue: &[RevenueRecord],
    costs: &[CostRecord],
) -> Vec<BusinessInsight> {
    InsightEngine::new().generate(&RuleContext::new(kpis, revenue, costs))
}
