//! Co-applicant join tests.

use grantid_core::{build_coapplicant_index, resolve_coapplicant};
use grantid_map::{CoapplicantsConfig, TransformSpec};
use grantid_model::{PersonRole, RawRecord, RecordId};
use serde_json::json;

fn record(number: u64, values: serde_json::Value) -> RawRecord {
    let serde_json::Value::Object(map) = values else {
        panic!("record must be an object");
    };
    RawRecord::new(
        RecordId::from_first_16_bytes_of_sha256([number as u8; 32]),
        number,
        map,
    )
}

fn config() -> CoapplicantsConfig {
    CoapplicantsConfig {
        join_key: "ApplicationID".to_string(),
        grant_join_field: "ApplicationID".to_string(),
        name_field: Some("Name".to_string()),
        name_transform: Some(TransformSpec::SplitName {
            separator: ",".to_string(),
        }),
        institution_field: Some("Institution".to_string()),
        country_field: Some("Country".to_string()),
    }
}

#[test]
fn matching_join_key_yields_an_investigator() {
    let config = config();
    let secondary = vec![record(
        1,
        json!({
            "ApplicationID": "12345",
            "Name": "Tremblay, Marie",
            "Institution": "Université de Montréal",
            "Country": "Canada"
        }),
    )];
    let index = build_coapplicant_index(&secondary, &config);

    let grant_record = record(10, json!({ "ApplicationID": "12345" }));
    let person = resolve_coapplicant(&grant_record, &config, &index).expect("co-applicant");

    assert_eq!(person.role, PersonRole::Investigator);
    assert_eq!(person.family_name.as_deref(), Some("Tremblay"));
    assert_eq!(person.given_name.as_deref(), Some("Marie"));
    let affiliation = person.affiliation.expect("affiliation");
    assert_eq!(affiliation.institution, "Université de Montréal");
    assert_eq!(affiliation.country.as_deref(), Some("CA"));
}

#[test]
fn non_matching_join_key_yields_nothing() {
    let config = config();
    let secondary = vec![record(1, json!({ "ApplicationID": "99999", "Name": "X, Y" }))];
    let index = build_coapplicant_index(&secondary, &config);

    let grant_record = record(10, json!({ "ApplicationID": "12345" }));
    assert!(resolve_coapplicant(&grant_record, &config, &index).is_none());
}

#[test]
fn duplicate_join_keys_resolve_to_the_last_record() {
    let config = config();
    let secondary = vec![
        record(1, json!({ "ApplicationID": "12345", "Name": "First, Entry" })),
        record(2, json!({ "ApplicationID": "12345", "Name": "Last, Entry" })),
    ];
    let index = build_coapplicant_index(&secondary, &config);

    let grant_record = record(10, json!({ "ApplicationID": "12345" }));
    let person = resolve_coapplicant(&grant_record, &config, &index).expect("co-applicant");
    assert_eq!(person.family_name.as_deref(), Some("Last"));
}

#[test]
fn untransformed_names_land_in_the_family_slot() {
    let mut config = config();
    config.name_transform = None;
    let secondary = vec![record(1, json!({ "ApplicationID": "12345", "Name": "Marie Tremblay" }))];
    let index = build_coapplicant_index(&secondary, &config);

    let grant_record = record(10, json!({ "ApplicationID": "12345" }));
    let person = resolve_coapplicant(&grant_record, &config, &index).expect("co-applicant");
    assert_eq!(person.family_name.as_deref(), Some("Marie Tremblay"));
    assert_eq!(person.given_name, None);
}

#[test]
fn record_with_no_usable_fields_is_not_a_person() {
    let config = config();
    let secondary = vec![record(1, json!({ "ApplicationID": "12345", "Note": "empty" }))];
    let index = build_coapplicant_index(&secondary, &config);

    let grant_record = record(10, json!({ "ApplicationID": "12345" }));
    assert!(resolve_coapplicant(&grant_record, &config, &index).is_none());
}
