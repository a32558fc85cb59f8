//! Account usage report records.

use crate::domain::{FieldError, RecordValidationError, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date (de)serialization for usage report ranges, `"YYYY-MM-DD"`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Usage report date layout.
    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Usage price arrives as a number or numeric string; unparseable is absent.
fn deserialize_usage_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Raw usage record JSON as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsagePayload {
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub count: String,

    #[serde(default)]
    pub count_unit: String,

    #[serde(default, deserialize_with = "deserialize_usage_price")]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_unit: Option<String>,

    #[serde(default)]
    pub usage: String,

    #[serde(default)]
    pub usage_unit: String,
}

/// One validated account usage report row.
///
/// Price is truncated to whole units per the report convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub category: String,
    pub description: String,
    #[serde(with = "date_format")]
    pub start_date: NaiveDate,
    #[serde(with = "date_format")]
    pub end_date: NaiveDate,
    pub count: String,
    pub count_unit: String,
    pub price: i64,
    pub price_unit: String,
    pub usage: String,
    pub usage_unit: String,
}

impl UsageRecord {
    /// Validate and convert a raw usage payload into a record.
    ///
    /// # Errors
    ///
    /// Returns `RecordValidationError` aggregating one `FieldError` per
    /// invalid field.
    pub fn from_payload(payload: &UsagePayload) -> Result<Self, RecordValidationError> {
        let start_date = parse_date("start_date", payload.start_date.as_deref());
        let end_date = parse_date("end_date", payload.end_date.as_deref());

        let mut fields = Vec::new();
        if let Err(error) = &start_date {
            fields.push(FieldError {
                field: "start_date",
                error: error.clone(),
            });
        }
        if let Err(error) = &end_date {
            fields.push(FieldError {
                field: "end_date",
                error: error.clone(),
            });
        }

        match (start_date, end_date) {
            (Ok(start_date), Ok(end_date)) => Ok(Self {
                category: payload.category.clone(),
                description: payload.description.clone(),
                start_date,
                end_date,
                count: payload.count.clone(),
                count_unit: payload.count_unit.clone(),
                price: payload.price.unwrap_or(0.0) as i64,
                price_unit: payload.price_unit.clone().unwrap_or_default(),
                usage: payload.usage.clone(),
                usage_unit: payload.usage_unit.clone(),
            }),
            _ => Err(RecordValidationError { fields }),
        }
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField { field })?;
    NaiveDate::parse_from_str(raw, date_format::FORMAT).map_err(|_| {
        ValidationError::InvalidTimestamp {
            field,
            value: raw.to_string(),
        }
    })
}
