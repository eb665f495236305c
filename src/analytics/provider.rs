//! Record providers
//!
//! The analytics service loads raw records through [`RecordProvider`], so the
//! same computation runs over the SQLite store, fixtures, or any caller-owned
//! source.

use std::collections::HashMap;

use crate::models::{CostRecord, RevenueRecord};
use crate::AnalyticsError;

/// Source of raw financial records for a user
pub trait RecordProvider {
    fn revenue_records(&self, user_id: &str) -> Result<Vec<RevenueRecord>, AnalyticsError>;
    fn cost_records(&self, user_id: &str) -> Result<Vec<CostRecord>, AnalyticsError>;
}

impl<P: RecordProvider + ?Sized> RecordProvider for &P {
    fn revenue_records(&self, user_id: &str) -> Result<Vec<RevenueRecord>, AnalyticsError> {
        (**self).revenue_records(user_id)
    }

    fn cost_records(&self, user_id: &str) -> Result<Vec<CostRecord>, AnalyticsError> {
        (**self).cost_records(user_id)
    }
}

/// Records held in memory, keyed by user id
///
/// Unknown users have no records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    revenue: HashMap<String, Vec<RevenueRecord>>,
    costs: HashMap<String, Vec<CostRecord>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's records
    pub fn with_user(
        mut self,
        user_id: impl Into<String>,
        revenue: Vec<RevenueRecord>,
        costs: Vec<CostRecord>,
    ) -> Self {
        let user_id = user_id.into();
        self.revenue.insert(user_id.clone(), revenue);
        self.costs.insert(user_id, costs);
        self
    }

    pub fn add_revenue(&mut self, user_id: &str, record: RevenueRecord) {
        self.revenue.entry(user_id.to_string()).or_default().push(record);
    }

    pub fn add_cost(&mut self, user_id: &str, record: CostRecord) {
        self.costs.entry(user_id.to_string()).or_default().push(record);
    }
}

impl RecordProvider for InMemoryProvider {
    fn revenue_records(&self, user_id: &str) -> Result<Vec<RevenueRecord>, AnalyticsError> {
        Ok(self.revenue.get(user_id).cloned().unwrap_or_default())
    }

    fn cost_records(&self, user_id: &str) -> Result<Vec<CostRecord>, AnalyticsError> {
        Ok(self.costs.get(user_id).cloned().unwrap_or_default())
    }
}
