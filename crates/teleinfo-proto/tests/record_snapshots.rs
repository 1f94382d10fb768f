//! Snapshot tests for record output stability.
//!
//! Downstream writers depend on the exact shape of coerced fields, so a
//! change in coercion or serialization shows up here first.

use chrono::{TimeZone, Utc};
use hex_literal::hex;
use insta::assert_snapshot;
use teleinfo_proto::{FieldValue, FrameRecord, parse_frame};

/// Payload of a single-phase meter on the "heures creuses" option.
const METER_PAYLOAD: &[u8] = b"\nADCO 031762120483 <\r\n\
OPTARIF HC.. <\r\n\
ISOUSC 30 9\r\n\
HCHC 001234567 \"\r\n\
HCHP 000987654 :\r\n\
PTEC HP..  \r\n\
IINST 002 Y\r\n\
IMAX 090 H\r\n\
PAPP 00450 *\r\n\
HHPHC A ,\r\n\
MOTDETAT 000000 B\r";

fn meter_record() -> FrameRecord {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    parse_frame(METER_PAYLOAD, at).expect("meter payload should parse")
}

#[test]
fn snapshot_meter_record_display() {
    assert_snapshot!(
        meter_record().to_string(),
        @r#"{ADCO: "031762120483", OPTARIF: "HC", ISOUSC: 30, HCHC: 1234567, HCHP: 987654, PTEC: "HP", IINST: 2, IMAX: 90, PAPP: 450, HHPHC: "A", MOTDETAT: "000000"}"#
    );
}

#[test]
fn snapshot_meter_fields_json() {
    let fields = meter_record().format_fields().expect("fields should coerce");
    let json = serde_json::to_string(&fields).expect("fields should serialize");

    assert_snapshot!(
        json,
        @r#"[["ADCO","031762120483"],["OPTARIF","HC"],["ISOUSC",30],["HCHC",1234567],["HCHP",987654],["PTEC","HP"],["IINST",2],["IMAX",90],["PAPP",450],["HHPHC","A"],["MOTDETAT","000000"]]"#
    );
}

#[test]
fn raw_values_are_kept_verbatim() {
    let record = meter_record();

    assert_eq!(record.raw("ADCO"), Some(&hex!("303331373632313230343833")[..]));
    assert_eq!(record.raw("OPTARIF"), Some(&b"HC.."[..]));
}

#[test]
fn set_value_is_coerced_on_read() {
    let mut record = meter_record();
    record.set("PAPP", 1200);
    record.set("PTEC", "HC..");

    assert_eq!(record.get("PAPP"), Ok(FieldValue::Integer(1200)));
    assert_eq!(record.get("PTEC"), Ok(FieldValue::Text("HC".into())));
}
