//! Record assembly tests: rule dispatch, failure isolation, role demotion.

use grantid_core::{JoinIndexes, assemble_grant, build_coapplicant_index};
use grantid_map::Config;
use grantid_model::{FunderId, PersonRole, RawRecord, RecordId};
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

#[test]
fn missing_direct_source_is_absent_not_an_error() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  project-title:
    source_field: ApplicationTitle
  description:
    source_field: Summary
"#,
    )
    .unwrap();
    let record = record(1, json!({ "ApplicationTitle": "Research Project" }));

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).expect("assembles");
    assert_eq!(output.grant.title.as_deref(), Some("Research Project"));
    assert_eq!(output.grant.description, None);
    assert!(output.warnings.is_empty());
}

#[test]
fn missing_required_field_fails_the_record() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
    required: true
"#,
    )
    .unwrap();
    let record = record(1, json!({ "ApplicationTitle": "No id here" }));

    let error = assemble_grant(&record, &config, &JoinIndexes::default()).unwrap_err();
    assert!(error.to_string().contains("award-number"));
}

#[test]
fn direct_default_fills_missing_values() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  description:
    source_field: Summary
    default: No description provided
"#,
    )
    .unwrap();
    let record = record(1, json!({ "ApplicationID": "1" }));

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).unwrap();
    assert_eq!(
        output.grant.description.as_deref(),
        Some("No description provided")
    );
}

#[test]
fn transforms_and_statics_fill_grant_slots() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
  award_amount:
    source_field: AwardAmount
    currency: CAD
  funding_type:
    static_value: grant
  doi:
    transform: construct_doi
    source_field: ApplicationID
    prefix: "10.13039/grant-"
  resource:
    transform: construct_url
    source_field: ApplicationID
    prefix: "https://grants.example.org/"
  award-start-date:
    transform: format_date
    source_field: StartDate
    input_format: "%d/%m/%Y"
"#,
    )
    .unwrap();
    let record = record(
        1,
        json!({
            "ApplicationID": "12345",
            "AwardAmount": 50000,
            "StartDate": "15/01/2024"
        }),
    );

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).unwrap();
    let grant = &output.grant;
    assert_eq!(grant.award_number.as_deref(), Some("12345"));
    assert_eq!(grant.award_amount.as_deref(), Some("50000"));
    assert_eq!(grant.currency.as_deref(), Some("CAD"));
    assert_eq!(grant.funding.funding_type, "grant");
    assert_eq!(grant.doi.as_deref(), Some("10.13039/grant-12345"));
    assert_eq!(
        grant.resource.as_deref(),
        Some("https://grants.example.org/12345")
    );
    assert_eq!(grant.award_start_date.as_deref(), Some("2024-01-15"));
}

#[test]
fn unparseable_date_is_a_warning_not_a_failure() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
  award-start-date:
    transform: format_date
    source_field: StartDate
    input_format: "%Y-%m-%d"
"#,
    )
    .unwrap();
    let record = record(1, json!({ "ApplicationID": "1", "StartDate": "unknown" }));

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).expect("assembles");
    assert_eq!(output.grant.award_start_date, None);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].field, "award-start-date");
}

#[test]
fn concatenate_joins_only_present_values() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  description:
    concatenate: [Summary, Objectives, Impact]
    separator: " "
"#,
    )
    .unwrap();
    let record = record(1, json!({ "Summary": "Studies grants.", "Impact": "High." }));

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).unwrap();
    assert_eq!(
        output.grant.description.as_deref(),
        Some("Studies grants. High.")
    );
}

#[test]
fn ror_wins_over_funder_name_regardless_of_order() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  funder_name:
    source_field: FunderName
  funder_ror:
    source_field: FunderRor
"#,
    )
    .unwrap();
    let record = record(
        1,
        json!({ "FunderName": "Example Funder", "FunderRor": "https://ror.org/02e2c7k09" }),
    );

    let output = assemble_grant(&record, &config, &JoinIndexes::default()).unwrap();
    assert_eq!(
        output.grant.funding.funder,
        Some(FunderId::Ror("https://ror.org/02e2c7k09".to_string()))
    );
}

#[test]
fn flat_lead_person_and_coapplicant_ordering() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
  investigators:
    person_name:
      transform: split_name
      source_field: Applicant
      separator: ","
    affiliation:
      source_field: Institution
      country_field: Country
coapplicants_config:
  join_key: ApplicationID
  grant_join_field: ApplicationID
  name_field: Name
  name_transform: split_name
  name_separator: ","
  institution_field: Institution
"#,
    )
    .unwrap();
    let coapplicants = vec![record(
        1,
        json!({ "ApplicationID": "12345", "Name": "Roy, Jean", "Institution": "Laval" }),
    )];
    let indexes = JoinIndexes {
        related_works: None,
        coapplicants: Some(build_coapplicant_index(
            &coapplicants,
            config.coapplicants.as_ref().unwrap(),
        )),
    };
    let record = record(
        2,
        json!({
            "ApplicationID": "12345",
            "Applicant": "Smith, John",
            "Institution": "McGill University",
            "Country": "Canada"
        }),
    );

    let output = assemble_grant(&record, &config, &indexes).unwrap();
    let investigators = &output.grant.investigators;
    assert_eq!(investigators.len(), 2);
    assert_eq!(investigators[0].role, PersonRole::LeadInvestigator);
    assert_eq!(investigators[0].family_name.as_deref(), Some("Smith"));
    assert_eq!(
        investigators[0].affiliation.as_ref().unwrap().country.as_deref(),
        Some("CA")
    );
    // The joined co-applicant always follows the record's own investigators.
    assert_eq!(investigators[1].role, PersonRole::Investigator);
    assert_eq!(investigators[1].family_name.as_deref(), Some("Roy"));
}

#[test]
fn empty_records_are_rejected() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  project-title:
    source_field: Title
"#,
    )
    .unwrap();
    let record = record(1, json!({}));
    assert!(assemble_grant(&record, &config, &JoinIndexes::default()).is_err());
}
