//! Insights module
//!
//! Turns KPIs and raw records into prioritized, actionable business insights
//! through an ordered table of independent rules.

pub mod engine;
pub mod rules;
pub mod seasonality;
pub mod summary;

// Re-export commonly used types
pub use engine::{default_rules, generate_insights, InsightEngine, InsightRule, RuleContext};
pub use summary::InsightSummary;
