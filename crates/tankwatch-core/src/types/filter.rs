//! List filters: by tank name and/or by calendar period.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::types::{EncroachmentRecord, OBSERVATION_YEARS};

/// A half-open `[start, end)` range of observation dates covering one
/// calendar year or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
    last: NaiveDate,
}

impl Period {
    /// The whole of `year`: `[Jan 1 year, Jan 1 year+1)`.
    pub fn year(year: i32) -> Result<Self> {
        check_year(year)?;
        let start = first_of(year, 1)?;
        let end = first_of(next_year(year)?, 1)?;
        Self::between(start, end)
    }

    /// One month: `[first of month, first of next month)`.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_query(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        check_year(year)?;
        let start = first_of(year, month)?;
        let end = if month == 12 {
            first_of(next_year(year)?, 1)?
        } else {
            first_of(year, month + 1)?
        };
        Self::between(start, end)
    }

    fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let last = end
            .pred_opt()
            .ok_or_else(|| Error::invalid_query(format!("no day before {end}")))?;
        Ok(Self { start, end, last })
    }

    /// Builds a period from optional query parts.
    ///
    /// A month without a year is ignored.
    pub fn from_parts(year: Option<i32>, month: Option<u32>) -> Result<Option<Self>> {
        match (year, month) {
            (Some(y), Some(m)) => Self::month(y, m).map(Some),
            (Some(y), None) => Self::year(y).map(Some),
            (None, _) => Ok(None),
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last day inside the period.
    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Whether `date` falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

fn check_year(year: i32) -> Result<()> {
    if OBSERVATION_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(Error::invalid_query(format!(
            "year must be between {} and {}, got {year}",
            OBSERVATION_YEARS.start(),
            OBSERVATION_YEARS.end()
        )))
    }
}

fn next_year(year: i32) -> Result<i32> {
    year.checked_add(1)
        .ok_or_else(|| Error::invalid_query(format!("year {year} is out of range")))
}

fn first_of(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_query(format!("year {year} is out of range")))
}

/// Predicate restricting which records a list query returns.
///
/// The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact tank name match.
    pub tank_name: Option<String>,
    /// Observation date period.
    pub period: Option<Period>,
}

impl RecordFilter {
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one tank.
    pub fn with_tank(mut self, tank_name: impl Into<String>) -> Self {
        self.tank_name = Some(tank_name.into());
        self
    }

    /// Restricts to one period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Whether the record satisfies every condition.
    pub fn matches(&self, record: &EncroachmentRecord) -> bool {
        let tank_ok = self
            .tank_name
            .as_deref()
            .is_none_or(|name| record.tank_name == name);
        let period_ok = self
            .period
            .is_none_or(|p| p.contains(record.observation_date));
        tank_ok && period_ok
    }
}
