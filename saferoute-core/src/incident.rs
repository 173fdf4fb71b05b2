//! Historical incident reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Coordinate;

/// A persisted incident report.
///
/// Reports are immutable once recorded. The serialised form uses the column
/// names of the backing table, so `recorded_at` appears as `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    /// Store-assigned identifier.
    pub id: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Free-text incident category.
    pub category: String,
    /// RFC 3339 timestamp recorded when the report was stored.
    #[serde(rename = "date")]
    pub recorded_at: String,
}

impl IncidentReport {
    /// Position of the incident.
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A stored row exactly as the backing table holds it.
///
/// The table does not constrain column types, so a row may carry a missing or
/// non-numeric coordinate. Listings return every row in this form; only rows
/// that [`IncidentRecord::to_report`] can place take part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Stored latitude value.
    pub latitude: Value,
    /// Stored longitude value.
    pub longitude: Value,
    /// Stored category value.
    pub category: Value,
    /// Stored timestamp value.
    #[serde(rename = "date")]
    pub recorded_at: Value,
}

impl IncidentRecord {
    /// Interpret the row as a placeable report.
    ///
    /// Coordinates may be numbers or numeric text. Returns `None` when either
    /// coordinate is missing, non-numeric or non-finite. A missing category or
    /// timestamp reads as an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use saferoute_core::IncidentRecord;
    /// use serde_json::json;
    ///
    /// let record = IncidentRecord {
    ///     id: 7,
    ///     latitude: json!("51.5"),
    ///     longitude: json!(-0.12),
    ///     category: json!("theft"),
    ///     recorded_at: json!(null),
    /// };
    /// let report = record.to_report().expect("numeric text is placeable");
    /// assert_eq!(report.latitude, 51.5);
    /// assert_eq!(report.recorded_at, "");
    /// ```
    #[must_use]
    pub fn to_report(&self) -> Option<IncidentReport> {
        Some(IncidentReport {
            id: self.id,
            latitude: coordinate_value(&self.latitude)?,
            longitude: coordinate_value(&self.longitude)?,
            category: text_value(&self.category),
            recorded_at: text_value(&self.recorded_at),
        })
    }
}

impl From<IncidentReport> for IncidentRecord {
    fn from(report: IncidentReport) -> Self {
        Self {
            id: report.id,
            latitude: Value::from(report.latitude),
            longitude: Value::from(report.longitude),
            category: Value::String(report.category),
            recorded_at: Value::String(report.recorded_at),
        }
    }
}

fn coordinate_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn text_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Payload for recording a new incident.
///
/// The store assigns the identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Free-text incident category.
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serialises_with_table_column_names() {
        let report = IncidentReport {
            id: 3,
            latitude: 1.5,
            longitude: -2.5,
            category: "theft".into(),
            recorded_at: "2024-05-01T12:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&report).expect("serialise report");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "latitude": 1.5,
                "longitude": -2.5,
                "category": "theft",
                "date": "2024-05-01T12:00:00.000Z",
            })
        );
    }

    #[rstest]
    fn location_combines_components() {
        let report = IncidentReport {
            id: 1,
            latitude: 10.0,
            longitude: 20.0,
            category: String::new(),
            recorded_at: String::new(),
        };
        assert_eq!(report.location(), Coordinate::new(10.0, 20.0));
    }

    fn record(latitude: Value, longitude: Value) -> IncidentRecord {
        IncidentRecord {
            id: 4,
            latitude,
            longitude,
            category: json!("assault"),
            recorded_at: json!("2024-05-01T12:00:00.000Z"),
        }
    }

    #[rstest]
    #[case(json!(51.5), json!(-0.12))]
    #[case(json!("51.5"), json!(" -0.12 "))]
    fn numeric_coordinates_are_placeable(#[case] latitude: Value, #[case] longitude: Value) {
        let report = record(latitude, longitude).to_report().expect("placeable");
        assert_eq!(report.location(), Coordinate::new(51.5, -0.12));
        assert_eq!(report.category, "assault");
    }

    #[rstest]
    #[case(Value::Null, json!(2.0))]
    #[case(json!("abc"), json!(2.0))]
    #[case(json!(1.0), json!(""))]
    #[case(json!("NaN"), json!(2.0))]
    #[case(json!(1.0), json!([2.0]))]
    fn unplaceable_coordinates_yield_nothing(#[case] latitude: Value, #[case] longitude: Value) {
        assert_eq!(record(latitude, longitude).to_report(), None);
    }

    #[rstest]
    fn missing_text_reads_as_empty() {
        let mut row = record(json!(1.0), json!(2.0));
        row.category = Value::Null;
        row.recorded_at = Value::Null;
        let report = row.to_report().expect("placeable");
        assert_eq!(report.category, "");
        assert_eq!(report.recorded_at, "");
    }

    #[rstest]
    fn record_from_report_keeps_column_names() {
        let record = IncidentRecord::from(IncidentReport {
            id: 2,
            latitude: 1.5,
            longitude: -2.5,
            category: "theft".into(),
            recorded_at: "2024-05-01T12:00:00.000Z".into(),
        });
        assert_eq!(
            serde_json::to_value(&record).expect("serialise record"),
            json!({
                "id": 2,
                "latitude": 1.5,
                "longitude": -2.5,
                "category": "theft",
                "date": "2024-05-01T12:00:00.000Z",
            })
        );
    }
}
