//! `/api/encroachments`: list and create.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tankwatch_core::{EncroachmentRecord, Error as CoreError, NewEncroachment, Period, RecordFilter};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string accepted by the list endpoint.
///
/// Values arrive as text and are parsed by [`ListParams::into_filter`] so a
/// bad number is reported as an invalid query instead of a generic rejection.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Exact tank name. Empty means no tank filter.
    pub tank_name: Option<String>,
    /// Four-digit year.
    pub year: Option<String>,
    /// Month number, 1-12. Ignored without `year`.
    pub month: Option<String>,
}

impl ListParams {
    /// Converts the raw parameters into a store filter.
    pub fn into_filter(self) -> tankwatch_core::Result<RecordFilter> {
        let year = parse_number::<i32>("year", self.year.as_deref())?;
        let month = parse_number::<u32>("month", self.month.as_deref())?;

        let mut filter = RecordFilter::all();
        if let Some(tank) = self.tank_name.filter(|t| !t.is_empty()) {
            filter = filter.with_tank(tank);
        }
        if let Some(period) = Period::from_parts(year, month)? {
            filter = filter.with_period(period);
        }
        Ok(filter)
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    raw: Option<&str>,
) -> tankwatch_core::Result<Option<T>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CoreError::invalid_query(format!("{name} must be a number, got '{value}'"))),
    }
}

/// `GET /api/encroachments`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<EncroachmentRecord>>, ApiError> {
    let Query(params) =
        params.map_err(|e| ApiError::Fetch(CoreError::invalid_query(e.body_text())))?;
    let filter = params.into_filter().map_err(ApiError::Fetch)?;

    let records = state.store.list(&filter).await.map_err(ApiError::Fetch)?;
    tracing::debug!(count = records.len(), ?filter, "Listed encroachments");
    Ok(Json(records))
}

/// `POST /api/encroachments`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewEncroachment>, JsonRejection>,
) -> Result<(StatusCode, Json<EncroachmentRecord>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::MalformedBody(e.body_text()))?;

    let record = state.store.create(input).await.map_err(ApiError::Save)?;
    tracing::info!(id = %record.id, tank = %record.tank_name, "Saved encroachment report");
    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(tank: Option<&str>, year: Option<&str>, month: Option<&str>) -> ListParams {
        ListParams {
            tank_name: tank.map(String::from),
            year: year.map(String::from),
            month: month.map(String::from),
        }
    }

    #[test]
    fn test_empty_params_match_everything() {
        assert_eq!(ListParams::default().into_filter().unwrap(), RecordFilter::all());
    }

    #[test]
    fn test_empty_tank_name_ignored() {
        assert_eq!(
            params(Some(""), None, None).into_filter().unwrap(),
            RecordFilter::all()
        );
    }

    #[test]
    fn test_year_and_month_build_period() {
        let filter = params(Some("T1"), Some("2023"), Some("5")).into_filter().unwrap();
        assert_eq!(
            filter,
            RecordFilter::all()
                .with_tank("T1")
                .with_period(Period::month(2023, 5).unwrap())
        );
    }

    #[test]
    fn test_month_without_year_ignored() {
        assert_eq!(
            params(None, None, Some("5")).into_filter().unwrap(),
            RecordFilter::all()
        );
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let err = params(None, Some("twenty"), None).into_filter().unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuery { .. }));

        let err = params(None, Some("2023"), Some("13")).into_filter().unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuery { .. }));
    }
}
