use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::{Timeframe, ValidationError};

/// One asset's price and cumulative return on a reporting day.
///
/// Deserialization is lenient: upstream values are taken as-is so that
/// malformed rows degrade the aligned output instead of failing the fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub normalized_return: f64,
    pub price: f64,
}

impl Observation {
    pub fn new(
        date: impl Into<String>,
        normalized_return: f64,
        price: f64,
    ) -> Result<Self, ValidationError> {
        validate_finite("normalized_return", normalized_return)?;
        validate_positive("price", price)?;

        Ok(Self {
            date: date.into(),
            normalized_return,
            price,
        })
    }

    /// Parse `date` as a `YYYY-MM-DD` calendar date.
    pub fn calendar_date(&self) -> Result<Date, ValidationError> {
        parse_calendar_date(&self.date)
    }
}

/// Chronologically ordered observations for one asset over one timeframe.
pub type AssetSeries = Vec<Observation>;

/// Raw body of the performance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub crypto_data: AssetSeries,
    pub traditional_data: AssetSeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

impl PerformanceSnapshot {
    pub fn new(crypto_data: AssetSeries, traditional_data: AssetSeries) -> Self {
        Self {
            crypto_data,
            traditional_data,
            timeframe: None,
        }
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }
}

/// Display metadata for one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of the asset metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsInfo {
    pub crypto: AssetDescriptor,
    pub traditional: AssetDescriptor,
}

/// Wire format of `Observation::date`.
const CALENDAR_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn parse_calendar_date(value: &str) -> Result<Date, ValidationError> {
    Date::parse(value.trim(), CALENDAR_DATE).map_err(|_| ValidationError::InvalidDate {
        value: value.to_owned(),
    })
}

pub(crate) fn format_calendar_date(date: Date) -> String {
    date.format(CALENDAR_DATE).unwrap_or_else(|_| date.to_string())
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_price() {
        let err = Observation::new("2024-01-01", 1.5, 0.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveValue { field: "price" }));
    }

    #[test]
    fn rejects_non_finite_return() {
        let err = Observation::new("2024-01-01", f64::NAN, 10.0).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue {
                field: "normalized_return"
            }
        ));
    }

    #[test]
    fn deserializes_without_validation() {
        let observation: Observation =
            serde_json::from_str(r#"{"date":"not-a-date","price":-3.0,"normalized_return":2.0}"#)
                .expect("lenient decode");
        assert_eq!(observation.price, -3.0);
        assert!(observation.calendar_date().is_err());
    }

    #[test]
    fn calendar_date_round_trips_through_formatter() {
        let observation = Observation::new("2024-02-29", 0.0, 1.0).expect("valid");
        let date = observation.calendar_date().expect("leap day parses");
        assert_eq!(format_calendar_date(date), "2024-02-29");
    }

    #[test]
    fn formatted_dates_are_zero_padded() {
        assert_eq!(
            format_calendar_date(time::macros::date!(2024 - 01 - 05)),
            "2024-01-05"
        );
    }

    #[test]
    fn snapshot_timeframe_is_optional() {
        let snapshot: PerformanceSnapshot =
            serde_json::from_str(r#"{"crypto_data":[],"traditional_data":[]}"#).expect("decode");
        assert_eq!(snapshot.timeframe, None);
    }
}
