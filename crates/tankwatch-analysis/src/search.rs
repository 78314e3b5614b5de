//! Report table search.

use tankwatch_core::EncroachmentRecord;

/// Records whose tank name contains `term`, ignoring case.
///
/// An empty or whitespace-only term matches everything. Order is preserved.
pub fn search_by_tank_name<'a>(
    records: &'a [EncroachmentRecord],
    term: &str,
) -> Vec<&'a EncroachmentRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| r.tank_name.to_lowercase().contains(&needle))
        .collect()
}
