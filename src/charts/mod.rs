//! Chart data module
//!
//! This module turns raw records into chart-ready series:
//! - Calendar month bucketing with zero-filled gaps
//! - Revenue, cost, and profit monthly series
//! - Top cost categories

pub mod monthly;
pub mod processor;

pub use processor::{
    process_cost_data, process_profit_data, process_revenue_data, top_cost_categories,
};
