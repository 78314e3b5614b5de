//! # tankwatch-analysis
//!
//! Aggregations behind the report table and the per-tank dashboard.
//!
//! All of it runs on records that were already fetched; nothing here
//! performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod dashboard;
pub mod search;

pub use aggregate::{
    DailyCount, DateRange, TankSummary, TypeShare, daily_counts, filter_by_date_range, summarize,
    type_breakdown,
};
pub use dashboard::{Dashboard, DashboardView};
pub use search::search_by_tank_name;
