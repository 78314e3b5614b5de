//! Property-based tests for core types.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::types::{NewEncroachment, Period, parse_observation_date};
    use chrono::{Datelike, NaiveDate};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_month_period_contains_exactly_its_days(
            year in 1900i32..2200,
            month in 1u32..=12,
            offset in -40i64..40,
        ) {
            let period = Period::month(year, month).unwrap();
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let probe = first + chrono::Duration::days(offset);
            let expected = probe.year() == year && probe.month() == month;
            prop_assert_eq!(period.contains(probe), expected);
        }

        #[test]
        fn test_year_period_contains_exactly_its_days(
            year in 1900i32..2200,
            ordinal in 1u32..=366,
        ) {
            let period = Period::year(year).unwrap();
            if let Some(date) = NaiveDate::from_yo_opt(year, ordinal) {
                prop_assert!(period.contains(date));
            }
            let before = NaiveDate::from_ymd_opt(year, 1, 1).unwrap().pred_opt().unwrap();
            prop_assert!(!period.contains(before));
        }

        #[test]
        fn test_iso_dates_parse(days in 0i64..100_000) {
            let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
            prop_assert_eq!(parse_observation_date(&date.to_string()), Some(date));
        }

        #[test]
        fn test_non_blank_required_fields_validate(
            tank in "[A-Za-z][A-Za-z0-9 ]{0,20}",
            location in "[A-Za-z][A-Za-z ]{0,20}",
            kind in "[A-Za-z]{1,12}",
        ) {
            let input = NewEncroachment::new(tank.clone(), location, kind, "2023-05-04");
            let validated = input.validate().unwrap();
            prop_assert_eq!(validated.tank_name(), tank.as_str());
        }
    }
}
