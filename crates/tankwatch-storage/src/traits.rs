//! The record store abstraction.

use async_trait::async_trait;
use tankwatch_core::{EncroachmentRecord, NewEncroachment, RecordFilter, Result};

/// Durable, schema-enforced storage of encroachment records.
///
/// Implementations must validate on `create` and persist a record as a
/// single atomic write: a failed create leaves the store unchanged.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Validates `input`, assigns id and timestamps, and persists it.
    ///
    /// Fails with [`tankwatch_core::Error::Validation`] when required fields
    /// are missing or the date is unparsable, and with
    /// [`tankwatch_core::Error::Storage`] when the write fails.
    async fn create(&self, input: NewEncroachment) -> Result<EncroachmentRecord>;

    /// Returns every record matching `filter`, most recent observation first.
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<EncroachmentRecord>>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
