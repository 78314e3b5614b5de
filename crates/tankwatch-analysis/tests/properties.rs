//! Property tests for the dashboard aggregations.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use tankwatch_analysis::{
    DateRange, daily_counts, filter_by_date_range, summarize, type_breakdown,
};
use tankwatch_core::{EncroachmentRecord, NewEncroachment};

const TYPES: [&str; 4] = ["Fence", "Structure", "Cultivation", "Dumping"];

fn build(entries: &[(i64, usize)]) -> Vec<EncroachmentRecord> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    entries
        .iter()
        .map(|&(offset, kind)| {
            let observed = base + Duration::days(offset);
            let v = NewEncroachment::new("T1", "bund", TYPES[kind], observed.to_string())
                .validate()
                .unwrap();
            EncroachmentRecord::from_validated(v, Utc::now())
        })
        .collect()
}

fn entries() -> impl Strategy<Value = Vec<(i64, usize)>> {
    prop::collection::vec((0i64..1500, 0usize..TYPES.len()), 0..60)
}

proptest! {
    #[test]
    fn test_daily_counts_sum_to_total(entries in entries()) {
        let records = build(&entries);
        let series = daily_counts(&records);
        prop_assert_eq!(series.iter().map(|d| d.count).sum::<usize>(), records.len());
        let ascending = series.windows(2).all(|w| w[0].date < w[1].date);
        prop_assert!(ascending);
    }

    #[test]
    fn test_breakdown_counts_sum_to_total(entries in entries()) {
        let records = build(&entries);
        let breakdown = type_breakdown(&records);
        prop_assert_eq!(breakdown.iter().map(|t| t.count).sum::<usize>(), records.len());
        if !records.is_empty() {
            let percent: f64 = breakdown.iter().map(|t| t.percentage).sum();
            prop_assert!((percent - 100.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_summary_bounds_every_record(entries in entries()) {
        let records = build(&entries);
        match summarize(&records) {
            None => prop_assert!(records.is_empty()),
            Some(summary) => {
                prop_assert_eq!(summary.count, records.len());
                let bounded = records.iter().all(|r| {
                    summary.earliest <= r.observation_date && r.observation_date <= summary.latest
                });
                prop_assert!(bounded);
                let top = records
                    .iter()
                    .filter(|r| r.encroachment_type == summary.most_common_type)
                    .count();
                let top_is_max = type_breakdown(&records).iter().all(|t| t.count <= top);
                prop_assert!(top_is_max);
            }
        }
    }

    #[test]
    fn test_range_filter_keeps_only_inside(
        entries in entries(),
        start in 0i64..1500,
        len in 0i64..400,
    ) {
        let records = build(&entries);
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let range = DateRange::between(base + Duration::days(start), base + Duration::days(start + len));

        let kept = filter_by_date_range(&records, range);
        let expected = records.iter().filter(|r| range.contains(r.observation_date)).count();
        prop_assert_eq!(kept.len(), expected);
        let inside = kept.iter().all(|r| range.contains(r.observation_date));
        prop_assert!(inside);
    }
}
