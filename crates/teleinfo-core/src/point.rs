//! Output shape for time-series writers.
//!
//! A [`Point`] is what a database writer needs from one frame: a
//! measurement name chosen by the caller, the capture time and the coerced
//! fields.
//!
//! ```json
//! {"measurement":"teleinfo","time":"2024-01-15T08:30:00Z","fields":{"HCHC":1234567}}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use teleinfo_proto::{FieldError, FieldValue, FrameRecord};

/// One time-series write built from a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    /// Measurement name
    pub measurement: String,
    /// Capture time, serialized as ISO-8601 UTC
    #[serde(serialize_with = "iso8601")]
    pub time: DateTime<Utc>,
    /// Coerced fields in frame order, serialized as a map
    #[serde(serialize_with = "ordered_map")]
    pub fields: Vec<(String, FieldValue)>,
}

impl Point {
    /// Build a point from a parsed record.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails to coerce.
    pub fn from_record(
        measurement: impl Into<String>,
        record: &FrameRecord,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            measurement: measurement.into(),
            time: record.capture_time(),
            fields: record.format_fields()?,
        })
    }
}

fn iso8601<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn ordered_map<S: Serializer>(
    fields: &[(String, FieldValue)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(fields.iter().map(|(label, value)| (label, value)))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::TimeZone;
    use insta::assert_snapshot;
    use teleinfo_proto::parse_frame;

    use super::*;

    fn record() -> FrameRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let payload = Bytes::from_static(b"\nADCO 012345678901 E\r\nHCHC 001234567 \"\r");
        parse_frame(&payload, at).unwrap()
    }

    #[test]
    fn point_from_record() {
        let point = Point::from_record("teleinfo", &record()).unwrap();

        assert_eq!(point.measurement, "teleinfo");
        assert_eq!(point.time, record().capture_time());
        assert_eq!(point.fields.len(), 2);
    }

    #[test]
    fn snapshot_point_json() {
        let point = Point::from_record("teleinfo", &record()).unwrap();
        let json = serde_json::to_string(&point).unwrap();

        assert_snapshot!(
            json,
            @r#"{"measurement":"teleinfo","time":"2024-01-15T08:30:00Z","fields":{"ADCO":"012345678901","HCHC":1234567}}"#
        );
    }

    #[test]
    fn coercion_failure_is_reported() {
        let mut record = record();
        record.set("HCHC", "broken");

        assert!(matches!(
            Point::from_record("teleinfo", &record),
            Err(FieldError::InvalidInteger { .. })
        ));
    }
}
