//! Parsed frame record.
//!
//! A [`FrameRecord`] stores raw value bytes per label, exactly as they
//! passed checksum validation, and coerces them only when read. The single
//! write path, [`FrameRecord::set`], re-encodes a value as text and skips
//! the checksum: such values no longer come from the wire.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{
    errors::FieldError,
    fields::{FieldType, FieldValue},
};

/// Fields of one teleinfo frame plus the instant it was captured.
///
/// # Invariants
///
/// - Labels are unique. Re-inserting a label replaces its value but keeps
///   its original position.
/// - Fields are kept in first-insertion order, which is the order the meter
///   sent them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    fields: Vec<(String, Bytes)>,
    captured_at: DateTime<Utc>,
}

impl FrameRecord {
    /// Create an empty record captured at `captured_at`.
    pub fn new(captured_at: DateTime<Utc>) -> Self {
        Self { fields: Vec::new(), captured_at }
    }

    /// Store a raw value, replacing any previous value for `label`.
    pub(crate) fn insert(&mut self, label: &str, raw: Bytes) {
        match self.fields.iter_mut().find(|(known, _)| known == label) {
            Some((_, slot)) => *slot = raw,
            None => self.fields.push((label.to_string(), raw)),
        }
    }

    /// Raw bytes stored for `label`.
    pub fn raw(&self, label: &str) -> Option<&[u8]> {
        self.fields.iter().find(|(known, _)| known == label).map(|(_, raw)| raw.as_ref())
    }

    /// Read a field, coerced to the type declared for its label.
    ///
    /// # Errors
    ///
    /// - [`FieldError::Missing`] if the label is absent
    /// - [`FieldError::NotText`] if the raw bytes are not UTF-8
    /// - [`FieldError::InvalidInteger`] if an integer field does not parse
    pub fn get(&self, label: &str) -> Result<FieldValue, FieldError> {
        let raw = self.raw(label).ok_or_else(|| FieldError::Missing { label: label.to_string() })?;
        FieldType::of(label).coerce(label, raw)
    }

    /// Every field with its coerced value, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails with the first field that does not coerce.
    pub fn format_fields(&self) -> Result<Vec<(String, FieldValue)>, FieldError> {
        self.fields
            .iter()
            .map(|(label, raw)| {
                FieldType::of(label).coerce(label, raw).map(|value| (label.clone(), value))
            })
            .collect()
    }

    /// Overwrite (or add) a field with the text form of `value`.
    ///
    /// The new value is not checksummed.
    pub fn set(&mut self, label: &str, value: impl fmt::Display) {
        self.insert(label, Bytes::from(value.to_string()));
    }

    /// Instant the frame's end marker was read.
    pub fn capture_time(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the frame carried no lines.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (label, raw)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match FieldType::of(label).coerce(label, raw) {
                Ok(value @ FieldValue::Integer(_)) => write!(f, "{label}: {value}")?,
                Ok(FieldValue::Text(text)) => write!(f, "{label}: {text:?}")?,
                Err(_) => write!(f, "{label}: {:?}", String::from_utf8_lossy(raw))?,
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record() -> FrameRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let mut record = FrameRecord::new(at);
        record.insert("ADCO", Bytes::from_static(b"012345678901."));
        record.insert("HCHC", Bytes::from_static(b"001234567"));
        record
    }

    #[test]
    fn get_coerces_by_label() {
        let record = record();
        assert_eq!(record.get("ADCO"), Ok(FieldValue::Text("012345678901".into())));
        assert_eq!(record.get("HCHC"), Ok(FieldValue::Integer(1_234_567)));
    }

    #[test]
    fn get_missing_label() {
        assert_eq!(record().get("PAPP"), Err(FieldError::Missing { label: "PAPP".into() }));
    }

    #[test]
    fn format_fields_keeps_order() {
        let fields = record().format_fields().unwrap();
        assert_eq!(
            fields,
            vec![
                ("ADCO".to_string(), FieldValue::Text("012345678901".into())),
                ("HCHC".to_string(), FieldValue::Integer(1_234_567)),
            ]
        );
    }

    #[test]
    fn format_fields_is_idempotent() {
        let record = record();
        assert_eq!(record.format_fields(), record.format_fields());
    }

    #[test]
    fn format_fields_reports_bad_integer() {
        let mut record = record();
        record.set("PAPP", "n/a");

        assert_eq!(
            record.format_fields(),
            Err(FieldError::InvalidInteger { label: "PAPP".into(), value: "n/a".into() })
        );
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut record = record();
        record.set("ADCO", 42);

        assert_eq!(record.raw("ADCO"), Some(&b"42"[..]));
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["ADCO", "HCHC"]);
    }

    #[test]
    fn set_adds_new_field() {
        let mut record = record();
        record.set("PAPP", 450);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("PAPP"), Ok(FieldValue::Integer(450)));
    }

    #[test]
    fn capture_time_survives_set() {
        let mut record = record();
        let before = record.capture_time();
        record.set("HCHC", 1);
        assert_eq!(record.capture_time(), before);
    }

    #[test]
    fn display() {
        assert_eq!(record().to_string(), r#"{ADCO: "012345678901", HCHC: 1234567}"#);
    }
}
