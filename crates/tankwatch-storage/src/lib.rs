//! # tankwatch-storage
//!
//! Record store backends for Tankwatch.
//!
//! This crate provides:
//! - The [`RecordStore`] trait every backend implements
//! - [`SqliteStore`]: durable storage through `sqlx`
//! - [`MemoryStore`]: process-local storage for tests and demos
//! - [`connect`]: picks a backend from a connection string

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod database;
pub mod memory;
pub mod traits;

use std::sync::Arc;

use tankwatch_core::{Error, Result};

pub use database::SqliteStore;
pub use memory::MemoryStore;
pub use traits::RecordStore;

/// Opens the store named by `url`.
///
/// - `memory` or `memory://` → [`MemoryStore`]
/// - `sqlite:...` → [`SqliteStore`]
///
/// Any other scheme is a configuration error.
pub async fn connect(url: &str) -> Result<Arc<dyn RecordStore>> {
    let url = url.trim();
    if url == "memory" || url == "memory://" {
        tracing::warn!("using in-memory record store; reports will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    if url.starts_with("sqlite:") {
        return Ok(Arc::new(SqliteStore::connect(url).await?));
    }
    Err(Error::config(format!(
        "unsupported database URL '{url}' (expected 'sqlite:...' or 'memory')"
    )))
}
