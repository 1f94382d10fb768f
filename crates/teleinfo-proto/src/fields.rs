//! Field type table and coerced values.
//!
//! Teleinfo values are ASCII on the wire. A small static table tells which
//! labels carry integers; everything else, including labels the table has
//! never heard of, is text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Text with trailing `.` padding removed
    String,
    /// Base-10 integer
    Integer,
}

/// Labels with a known type. Absent labels are [`FieldType::String`].
const FIELD_TYPES: &[(&str, FieldType)] = &[
    ("ADCO", FieldType::String),
    ("OPTARIF", FieldType::String),
    ("ISOUSC", FieldType::Integer),
    ("HCHC", FieldType::Integer),
    ("HCHP", FieldType::Integer),
    ("PTEC", FieldType::String),
    ("IINST", FieldType::Integer),
    ("IMAX", FieldType::Integer),
    ("PAPP", FieldType::Integer),
    ("HHPHC", FieldType::String),
    ("MOTDETAT", FieldType::String),
];

impl FieldType {
    /// Look up the declared type of `label`.
    pub fn of(label: &str) -> Self {
        FIELD_TYPES
            .iter()
            .find_map(|&(known, ty)| (known == label).then_some(ty))
            .unwrap_or(Self::String)
    }

    /// Coerce raw wire bytes to this type.
    ///
    /// `label` is only used to build the error.
    pub fn coerce(self, label: &str, raw: &[u8]) -> Result<FieldValue, FieldError> {
        let text = std::str::from_utf8(raw)
            .map_err(|_| FieldError::NotText { label: label.to_string() })?;

        match self {
            Self::String => Ok(FieldValue::Text(text.trim_end_matches('.').to_string())),
            Self::Integer => text.parse::<i64>().map(FieldValue::Integer).map_err(|_| {
                FieldError::InvalidInteger { label: label.to_string(), value: text.to_string() }
            }),
        }
    }
}

/// A field value after coercion.
///
/// Serializes untagged, so a record maps to plain JSON strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer field
    Integer(i64),
    /// Text field
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels() {
        assert_eq!(FieldType::of("HCHC"), FieldType::Integer);
        assert_eq!(FieldType::of("PAPP"), FieldType::Integer);
        assert_eq!(FieldType::of("ADCO"), FieldType::String);
        assert_eq!(FieldType::of("MOTDETAT"), FieldType::String);
    }

    #[test]
    fn unknown_label_defaults_to_string() {
        assert_eq!(FieldType::of("BASE"), FieldType::String);
        assert_eq!(FieldType::of("hchc"), FieldType::String);
    }

    #[test]
    fn string_strips_trailing_dots() {
        let value = FieldType::String.coerce("ADCO", b"012345678901.").unwrap();
        assert_eq!(value, FieldValue::Text("012345678901".into()));

        let value = FieldType::String.coerce("PTEC", b"HP..").unwrap();
        assert_eq!(value, FieldValue::Text("HP".into()));
    }

    #[test]
    fn string_keeps_inner_dots() {
        let value = FieldType::String.coerce("X", b"A.B.").unwrap();
        assert_eq!(value, FieldValue::Text("A.B".into()));
    }

    #[test]
    fn integer_drops_leading_zeros() {
        let value = FieldType::Integer.coerce("HCHC", b"001234567").unwrap();
        assert_eq!(value, FieldValue::Integer(1_234_567));
    }

    #[test]
    fn integer_rejects_garbage() {
        let err = FieldType::Integer.coerce("PAPP", b"12a").unwrap_err();
        assert_eq!(err, FieldError::InvalidInteger { label: "PAPP".into(), value: "12a".into() });

        assert!(FieldType::Integer.coerce("PAPP", b"").is_err());
    }

    #[test]
    fn non_utf8_is_not_text() {
        let err = FieldType::String.coerce("ADCO", &[0xc3, 0x28]).unwrap_err();
        assert_eq!(err, FieldError::NotText { label: "ADCO".into() });
    }

    #[test]
    fn display() {
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::Text("HC".into()).to_string(), "HC");
    }
}
