//! KPI calculation module
//!
//! Period-over-period financial metrics:
//! - Current and previous window totals
//! - Trend deltas and status classification for the six KPIs

pub mod kpi;
pub mod window;

pub use kpi::calculate_kpis;
pub use window::{relative_change, Window, WindowTotals};
