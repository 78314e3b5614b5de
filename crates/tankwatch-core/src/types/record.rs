//! The encroachment record, its create input, and input validation.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

use crate::error::{Error, FieldError, Result};
use crate::types::RecordId;

/// Wire name of the tank name field.
pub const FIELD_TANK_NAME: &str = "tankName";
/// Wire name of the location field.
pub const FIELD_LOCATION: &str = "location";
/// Wire name of the encroachment type field.
pub const FIELD_ENCROACHMENT_TYPE: &str = "encroachmentType";
/// Wire name of the observation date field.
pub const FIELD_OBSERVATION_DATE: &str = "observationDate";

/// Years an observation date may fall in. Dates are persisted as
/// `YYYY-MM-DD` text, which only orders correctly for four-digit years.
pub const OBSERVATION_YEARS: RangeInclusive<i32> = 0..=9999;

/// A stored report of an encroachment on a tank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncroachmentRecord {
    /// Store-assigned identifier.
    pub id: RecordId,

    /// Tank the report concerns. Tanks are external reference data.
    pub tank_name: String,

    /// Free-form description of where on or around the tank.
    pub location: String,

    /// Free-form category label.
    pub encroachment_type: String,

    /// When the encroachment was observed.
    pub observation_date: NaiveDate,

    /// Optional observer notes.
    pub description: Option<String>,

    /// When the record was stored.
    pub created_at: DateTime<Utc>,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl EncroachmentRecord {
    /// Builds a new record from validated input, assigning the system fields.
    pub fn from_validated(input: ValidatedEncroachment, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            tank_name: input.tank_name,
            location: input.location,
            encroachment_type: input.encroachment_type,
            observation_date: input.observation_date,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Listing order: most recent observation first, then most recently
    /// created, then by id.
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.observation_date
            .cmp(&a.observation_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Current time at the precision the stores persist (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Formats a timestamp the way the stores persist it.
///
/// Fixed-width UTC with microseconds, so lexical order equals time order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Create input as received from a client.
///
/// Every required field is optional here so that a missing field surfaces
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEncroachment {
    /// Tank name.
    #[serde(default)]
    pub tank_name: Option<String>,

    /// Location on or around the tank.
    #[serde(default)]
    pub location: Option<String>,

    /// Encroachment category.
    #[serde(default)]
    pub encroachment_type: Option<String>,

    /// Observation date as text (`YYYY-MM-DD` or RFC 3339).
    #[serde(default)]
    pub observation_date: Option<String>,

    /// Optional notes.
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of checking a [`NewEncroachment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Returns `true` when no field failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field errors in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consumes the report, yielding its errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Input that has passed validation. Only obtainable via
/// [`NewEncroachment::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEncroachment {
    tank_name: String,
    location: String,
    encroachment_type: String,
    observation_date: NaiveDate,
    description: Option<String>,
}

impl ValidatedEncroachment {
    /// Tank name.
    pub fn tank_name(&self) -> &str {
        &self.tank_name
    }

    /// Observation date.
    pub fn observation_date(&self) -> NaiveDate {
        self.observation_date
    }
}

impl NewEncroachment {
    /// Creates an input with every required field set.
    pub fn new(
        tank_name: impl Into<String>,
        location: impl Into<String>,
        encroachment_type: impl Into<String>,
        observation_date: impl Into<String>,
    ) -> Self {
        Self {
            tank_name: Some(tank_name.into()),
            location: Some(location.into()),
            encroachment_type: Some(encroachment_type.into()),
            observation_date: Some(observation_date.into()),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks every field without consuming the input.
    pub fn check(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for (field, value) in [
            (FIELD_TANK_NAME, &self.tank_name),
            (FIELD_LOCATION, &self.location),
            (FIELD_ENCROACHMENT_TYPE, &self.encroachment_type),
        ] {
            if is_blank(value.as_deref()) {
                errors.push(FieldError::new(field, "is required"));
            }
        }

        match self.observation_date.as_deref() {
            None => errors.push(FieldError::new(FIELD_OBSERVATION_DATE, "is required")),
            Some(raw) if raw.trim().is_empty() => {
                errors.push(FieldError::new(FIELD_OBSERVATION_DATE, "is required"))
            }
            Some(raw) => match parse_observation_date(raw) {
                None => errors.push(FieldError::new(
                    FIELD_OBSERVATION_DATE,
                    format!("is not a valid date: '{raw}'"),
                )),
                Some(date) if !OBSERVATION_YEARS.contains(&date.year()) => {
                    errors.push(FieldError::new(
                        FIELD_OBSERVATION_DATE,
                        format!(
                            "must fall between years {} and {}",
                            OBSERVATION_YEARS.start(),
                            OBSERVATION_YEARS.end()
                        ),
                    ))
                }
                Some(_) => {}
            },
        }

        ValidationReport { errors }
    }

    /// Validates the input, producing a value the store can persist.
    pub fn validate(self) -> Result<ValidatedEncroachment> {
        let report = self.check();
        if !report.is_ok() {
            return Err(Error::Validation {
                fields: report.into_errors(),
            });
        }

        // check() guarantees every field below is present and well formed
        let observation_date = self
            .observation_date
            .as_deref()
            .and_then(parse_observation_date)
            .ok_or_else(|| Error::validation_field(FIELD_OBSERVATION_DATE, "is required"))?;

        Ok(ValidatedEncroachment {
            tank_name: self.tank_name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            encroachment_type: self.encroachment_type.unwrap_or_default(),
            observation_date,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Parses an observation date.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, which is
/// reduced to its UTC calendar date.
pub fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).date_naive())
}
