//! Per-tank analysis dashboard state.
//!
//! A [`Dashboard`] owns the records fetched for one tank and the currently
//! selected date range. Changing the range never touches the network: it
//! only changes what [`Dashboard::view`] computes.

use serde::Serialize;
use tankwatch_core::EncroachmentRecord;

use crate::aggregate::{
    DailyCount, DateRange, TankSummary, TypeShare, daily_counts, filter_by_date_range, summarize,
    type_breakdown,
};

/// State behind one tank's analysis page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    tank_name: String,
    records: Vec<EncroachmentRecord>,
    range: DateRange,
}

/// Everything the analysis page renders.
///
/// Stat cards summarize every record for the tank; the two chart series are
/// restricted to the selected date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Page heading.
    pub title: String,
    /// Stat cards; `None` when the tank has no reports.
    pub summary: Option<TankSummary>,
    /// Reports per day within the range.
    pub time_series: Vec<DailyCount>,
    /// Reports per type within the range.
    pub breakdown: Vec<TypeShare>,
}

impl DashboardView {
    /// The view shown when a tank has no reports.
    pub fn empty(tank_name: &str) -> Self {
        Self {
            title: format!("No reports found for {tank_name}"),
            summary: None,
            time_series: Vec::new(),
            breakdown: Vec::new(),
        }
    }

    /// Whether there is anything to chart.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
    }
}

impl Dashboard {
    /// Creates a dashboard over the records fetched for `tank_name`.
    pub fn new(tank_name: impl Into<String>, records: Vec<EncroachmentRecord>) -> Self {
        Self {
            tank_name: tank_name.into(),
            records,
            range: DateRange::open(),
        }
    }

    /// The tank this dashboard analyzes.
    pub fn tank_name(&self) -> &str {
        &self.tank_name
    }

    /// All fetched records.
    pub fn records(&self) -> &[EncroachmentRecord] {
        &self.records
    }

    /// The selected date range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Selects a new date range.
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Computes the current view.
    pub fn view(&self) -> DashboardView {
        let Some(summary) = summarize(&self.records) else {
            return DashboardView::empty(&self.tank_name);
        };

        let in_range = if self.range.is_open() {
            self.records.clone()
        } else {
            filter_by_date_range(&self.records, self.range)
        };

        DashboardView {
            title: format!("Analysis Dashboard for: {}", self.tank_name),
            summary: Some(summary),
            time_series: daily_counts(&in_range),
            breakdown: type_breakdown(&in_range),
        }
    }
}
