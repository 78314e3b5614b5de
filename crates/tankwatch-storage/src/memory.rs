//! In-memory record store.
//!
//! Nothing survives the process. Used by tests and by the `memory`
//! connection string for local demos.

use async_trait::async_trait;
use tankwatch_core::types::timestamp_now;
use tankwatch_core::{EncroachmentRecord, NewEncroachment, RecordFilter, Result};
use tokio::sync::RwLock;

use crate::traits::RecordStore;

/// A [`RecordStore`] backed by a `Vec` behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<EncroachmentRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, input: NewEncroachment) -> Result<EncroachmentRecord> {
        let validated = input.validate()?;
        let record = EncroachmentRecord::from_validated(validated, timestamp_now());

        self.records.write().await.push(record.clone());
        tracing::debug!(id = %record.id, tank = %record.tank_name, "stored encroachment in memory");
        Ok(record)
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<EncroachmentRecord>> {
        let records = self.records.read().await;
        let mut matching: Vec<_> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(EncroachmentRecord::newest_first);
        Ok(matching)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
