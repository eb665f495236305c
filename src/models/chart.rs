//! Chart data types
//!
//! Monthly and category buckets ready for visualization

use serde::{Deserialize, Serialize};

/// One calendar month of summed records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Month in YYYY-MM format
    pub id: String,
    /// Display label, e.g. "Mar 2024"
    pub name: String,
    /// Month in YYYY-MM format
    pub date: String,
    pub value: f64,
    pub count: u32,
}

impl MonthlyBucket {
    /// Create an empty bucket for a month key
    pub fn new(key: String, name: String) -> Self {
        Self {
            id: key.clone(),
            name,
            date: key,
            value: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, amount: f64) {
        self.value += amount;
        self.count += 1;
    }
}

/// One calendar month of profit, with its revenue and cost components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitBucket {
    pub id: String,
    pub name: String,
    pub date: String,
    /// Revenue minus costs
    pub value: f64,
    /// Revenue records plus cost records in the month
    pub count: u32,
    pub revenue: f64,
    pub costs: f64,
    /// Profit as a percentage of revenue, 0 when there is no revenue
    pub margin: f64,
}

/// Summed costs sharing one description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub count: u32,
}

/// Descriptive data attached to every chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub period: String,
    pub currency: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub data_source: String,
}

/// A chart series plus optional category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnalyticsData<T> {
    pub primary: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Vec<CategoryBucket>>,
    pub metadata: ChartMetadata,
}

impl<T> ChartAnalyticsData<T> {
    /// Sum of `value` across a series of monthly buckets
    pub fn total(&self) -> f64
    where
        T: BucketValue,
    {
        self.primary.iter().fold(0.0, |acc, b| acc + b.bucket_value())
    }
}

/// Access to the plotted value of a bucket
pub trait BucketValue {
    fn bucket_value(&self) -> f64;
}

impl BucketValue for MonthlyBucket {
    fn bucket_value(&self) -> f64 {
        self.value
    }
}

impl BucketValue for ProfitBucket {
    fn bucket_value(&self) -> f64 {
        self.value
    }
}
