use std::collections::BTreeMap;

use chassis::record::VinRecord;
use serde_json::json;

const VIN: &str = "1C4HJXFG8KW606403";

#[test]
fn construction_derives_validity() {
    let record = VinRecord::new(VIN, None);
    assert!(record.is_valid());
    assert_eq!(record.vin(), VIN);

    let record = VinRecord::new("11111111111111", None);
    assert!(!record.is_valid());

    let record = VinRecord::new("", None);
    assert!(!record.is_valid());
    assert!(record.store().is_empty());
}

#[test]
fn set_vin_revalidates() {
    let mut record = VinRecord::new("", None);
    record.set_vin(VIN);
    assert!(record.is_valid());
    record.set_vin("1C4HJXFG1KW606403");
    assert!(!record.is_valid());
}

#[test]
fn correct_check_code_applies_a_fix() {
    let mut record = VinRecord::new("1C4HJXFG1KW606403", None);
    assert!(!record.is_valid());
    assert!(record.correct_check_code());
    assert!(record.is_valid());
    assert_eq!(record.vin(), VIN);
}

#[test]
fn correct_check_code_leaves_valid_input_alone() {
    let mut record = VinRecord::new(VIN, None);
    assert!(!record.correct_check_code());
    assert_eq!(record.vin(), VIN);
    assert!(record.is_valid());
}

#[test]
fn correct_check_code_cannot_fix_bad_alphabet() {
    let mut record = VinRecord::new("1C4HJXFG8KW60640!", None);
    assert!(!record.correct_check_code());
    assert_eq!(record.vin(), "1C4HJXFG8KW60640!");

    let mut record = VinRecord::new("1569AF", None);
    assert!(!record.correct_check_code());
    assert_eq!(record.vin(), "1569AF");
}

#[test]
fn serialized_details_round_trip() {
    let blob = serde_json::to_vec(&json!({
        "VIN": VIN,
        "Make": "Jeep",
        "ModelYear": "2019",
    }))
    .unwrap();

    let mut record = VinRecord::new(VIN, None);
    let restored = record.restore(&blob).unwrap();
    assert_eq!(restored.len(), 3);

    let encoded = record.serialize_details().unwrap();
    let again = VinRecord::new(VIN, Some(&encoded));
    assert_eq!(again.store().attributes(), record.store().attributes());

    // The detail view lists every attribute in ascending key order.
    let names: Vec<&str> = again
        .store()
        .details()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, ["Make", "ModelYear", "VIN"]);
}

#[test]
fn restore_adopts_vin_into_an_empty_record() {
    let blob = serde_json::to_vec(&json!({ "VIN": VIN })).unwrap();
    let record = VinRecord::new("", Some(&blob));
    assert_eq!(record.vin(), VIN);
    assert!(record.is_valid());
}

#[test]
fn restore_never_overwrites_an_existing_vin() {
    let blob = serde_json::to_vec(&json!({ "VIN": VIN })).unwrap();
    let record = VinRecord::new("1J4FA69S43P322371", Some(&blob));
    assert_eq!(record.vin(), "1J4FA69S43P322371");
}

#[test]
fn restore_is_a_faithful_round_trip() {
    // Unlike the merge path, restore keeps empty and "Not Applicable" values.
    let blob = serde_json::to_vec(&json!({
        "Make": "Not Applicable",
        "Trim": "",
    }))
    .unwrap();

    let mut record = VinRecord::new(VIN, None);
    record.restore(&blob).unwrap();
    assert_eq!(record.store().get("Make"), Some("Not Applicable"));
    assert_eq!(record.store().get("Trim"), Some(""));
}

#[test]
fn restore_ignores_malformed_blobs() {
    let mut record = VinRecord::new(VIN, None);
    let blob = serde_json::to_vec(&json!({ "Make": "Jeep" })).unwrap();
    record.restore(&blob).unwrap();

    // Garbage bytes, a non-object document, and non-string values all leave
    // the prior state unchanged.
    assert!(record.restore(b"\x00\x01garbage").is_none());
    assert!(record.restore(b"[1, 2, 3]").is_none());
    assert!(record.restore(br#"{"Doors": 4}"#).is_none());
    assert_eq!(record.store().get("Make"), Some("Jeep"));
}

#[test]
fn construction_survives_a_garbage_blob() {
    let record = VinRecord::new("", Some(b"\xff\xfe not json"));
    assert_eq!(record.vin(), "");
    assert!(record.store().is_empty());
}

#[test]
fn merge_keeps_only_meaningful_strings() {
    let body = serde_json::to_vec(&json!({
        "Results": [{
            "VIN": VIN,
            "ErrorCode": "0",
            "Make": "Not Applicable",
            "Trim": "",
            "Doors": 4,
        }],
    }))
    .unwrap();

    let mut record = VinRecord::new(VIN, None);
    record.merge_decode_result(&body).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("VIN".to_owned(), VIN.to_owned());
    expected.insert("ErrorCode".to_owned(), "0".to_owned());
    assert_eq!(record.store().attributes(), &expected);
}

#[test]
fn merge_rejects_unexpected_shapes() {
    let mut record = VinRecord::new(VIN, None);
    let blob = serde_json::to_vec(&json!({ "Make": "Jeep" })).unwrap();
    record.restore(&blob).unwrap();

    // No Results array, an empty one, and a non-object first entry.
    assert!(record.merge_decode_result(br#"{"Count": 0}"#).is_err());
    assert!(record.merge_decode_result(br#"{"Results": []}"#).is_err());
    assert!(record.merge_decode_result(br#"{"Results": [7]}"#).is_err());
    assert!(record.merge_decode_result(b"not json").is_err());
    assert_eq!(record.store().get("Make"), Some("Jeep"));
}

#[test]
fn model_year_from_the_year_code() {
    let record = VinRecord::new(VIN, None);
    // K names 2019 or 1989; 2019 is never a year ahead of the present.
    assert_eq!(record.model_year(), 2019);

    let record = VinRecord::new("", None);
    assert_eq!(record.model_year(), 0);
}
