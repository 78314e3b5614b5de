//! Aggregations over an already-fetched list of records.
//!
//! Every function here is pure: same records in, same numbers out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tankwatch_core::EncroachmentRecord;

/// An inclusive observation date range. Missing bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with no bounds.
    pub fn open() -> Self {
        Self::default()
    }

    /// A range from `start` to `end`, both inclusive.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether the range has no bounds.
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `date` lies inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Records whose observation date lies in `range`, in their original order.
pub fn filter_by_date_range(
    records: &[EncroachmentRecord],
    range: DateRange,
) -> Vec<EncroachmentRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.observation_date))
        .cloned()
        .collect()
}

/// Headline numbers for one tank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankSummary {
    /// Number of reports.
    pub count: usize,
    /// Earliest observation date.
    pub earliest: NaiveDate,
    /// Latest observation date.
    pub latest: NaiveDate,
    /// The type reported most often.
    pub most_common_type: String,
}

/// Computes the summary, or `None` when there are no records.
///
/// Ties for the most common type go to the type observed earliest.
pub fn summarize(records: &[EncroachmentRecord]) -> Option<TankSummary> {
    let first = records.first()?;
    let mut earliest = first.observation_date;
    let mut latest = first.observation_date;
    for record in records {
        earliest = earliest.min(record.observation_date);
        latest = latest.max(record.observation_date);
    }

    let most_common_type = count_types(records)
        .into_iter()
        .fold(None::<(String, usize)>, |best, (kind, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((kind, count)),
        })
        .map(|(kind, _)| kind)?;

    Some(TankSummary {
        count: records.len(),
        earliest,
        latest,
        most_common_type,
    })
}

/// Reports observed on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// The day.
    pub date: NaiveDate,
    /// Reports observed that day.
    pub count: usize,
}

/// Per-day counts, ascending by date. Days without reports are omitted.
pub fn daily_counts(records: &[EncroachmentRecord]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *by_day.entry(record.observation_date).or_default() += 1;
    }
    by_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// One slice of the type proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    /// Encroachment type label.
    pub encroachment_type: String,
    /// Reports of this type.
    pub count: usize,
    /// Share of all reports, in percent, rounded to one decimal.
    pub percentage: f64,
}

/// Per-type counts, ordered by each type's earliest observation, with their
/// share of the total.
pub fn type_breakdown(records: &[EncroachmentRecord]) -> Vec<TypeShare> {
    let total = records.len();
    count_types(records)
        .into_iter()
        .map(|(encroachment_type, count)| TypeShare {
            encroachment_type,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Type counts in order of each type's earliest observation.
///
/// Records are visited oldest first; records observed on the same day keep
/// their input order.
fn count_types(records: &[EncroachmentRecord]) -> Vec<(String, usize)> {
    let mut oldest_first: Vec<&EncroachmentRecord> = records.iter().collect();
    oldest_first.sort_by_key(|r| r.observation_date);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in oldest_first {
        let kind = record.encroachment_type.as_str();
        match index.get(kind) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(kind, counts.len());
                counts.push((kind.to_string(), 1));
            }
        }
    }
    counts
}
