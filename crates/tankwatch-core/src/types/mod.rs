//! Core type definitions for Tankwatch.

mod filter;
mod ids;
mod record;

#[cfg(test)]
mod proptests;

pub use filter::{Period, RecordFilter};
pub use ids::RecordId;
pub use record::{
    EncroachmentRecord, FIELD_ENCROACHMENT_TYPE, FIELD_LOCATION, FIELD_OBSERVATION_DATE,
    FIELD_TANK_NAME, NewEncroachment, OBSERVATION_YEARS, ValidatedEncroachment, ValidationReport,
    format_timestamp, parse_observation_date, timestamp_now,
};
