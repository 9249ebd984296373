//! Configuration loading and validation tests.

use grantid_map::{
    Config, ConfigError, CountrySource, MappingRule, RelatedWorksConfig, TransformSpec,
};

const FULL_CONFIG: &str = r#"
header_static_values:
  doi_batch_id: nwo-grants-2024
  depositor_name: Example Institute
  depositor_email: deposits@example.org
  registrant: Example Institute

namespace_values:
  xmlns: http://www.crossref.org/grant_id/0.2.0
  "xsi:schemaLocation": "http://www.crossref.org/grant_id/0.2.0 http://www.crossref.org/schemas/grant_id0.2.0.xsd"

field_mappings:
  project-title:
    source_field: ApplicationTitle
  award-number:
    source_field: ApplicationID
    required: true
  description:
    concatenate: [Summary, Objectives]
    separator: " "
  award_amount:
    source_field: AwardAmount
    currency: CAD
  funding_type:
    static_value: grant
  funder_name:
    source_field: "_literal:Example Funder"
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
    output_format: "%Y-%m-%d"
  investigators:
    source_field: "_complex:members"

complex_fields:
  members:
    source: project_members
    priority_roles: ["Project leader", "Main Applicant"]
    fields:
      first_name: firstName
      last_name: lastName
      organisation: organisations
      orcid: orcid
      country: "_literal:NL"

related_works_config:
  embedded_field: products
  doi_field: url_open_access
  filter_pattern: 'doi\.org'
  relationship_type: finances

coapplicants_config:
  join_key: ApplicationID
  grant_join_field: ApplicationID
  name_field: Name
  name_transform: split_name
  name_separator: ","
  institution_field: Institution
  country_field: Country

options:
  json_root_path: data.grants
"#;

#[test]
fn full_config_parses_and_preserves_mapping_order() {
    let config = Config::from_yaml_str(FULL_CONFIG).expect("valid config");

    let names: Vec<&str> = config
        .field_mappings
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "project-title",
            "award-number",
            "description",
            "award_amount",
            "funding_type",
            "funder_name",
            "doi",
            "resource",
            "award-start-date",
            "investigators",
        ]
    );

    assert_eq!(
        config.header_static_values.doi_batch_id.as_deref(),
        Some("nwo-grants-2024")
    );
    assert_eq!(config.options.json_root_path.as_deref(), Some("data.grants"));
}

#[test]
fn rule_strategies_resolve_from_present_keys() {
    let config = Config::from_yaml_str(FULL_CONFIG).expect("valid config");

    match &config.mapping("award-number").unwrap().rule {
        MappingRule::Direct {
            source_field,
            required,
            ..
        } => {
            assert_eq!(source_field, "ApplicationID");
            assert!(required);
        }
        other => panic!("expected direct rule, got {other:?}"),
    }

    match &config.mapping("funding_type").unwrap().rule {
        MappingRule::Static { value } => assert_eq!(value, "grant"),
        other => panic!("expected static rule, got {other:?}"),
    }

    // `_literal:` prefixes collapse to static values at load time.
    match &config.mapping("funder_name").unwrap().rule {
        MappingRule::Static { value } => assert_eq!(value, "Example Funder"),
        other => panic!("expected static rule, got {other:?}"),
    }

    match &config.mapping("doi").unwrap().rule {
        MappingRule::Transform { transform, .. } => {
            assert_eq!(
                transform,
                &TransformSpec::ConstructDoi {
                    prefix: "10.13039/grant-".to_string()
                }
            );
        }
        other => panic!("expected transform rule, got {other:?}"),
    }

    match &config.mapping("investigators").unwrap().rule {
        MappingRule::Complex { key } => assert_eq!(key, "members"),
        other => panic!("expected complex rule, got {other:?}"),
    }

    assert_eq!(
        config.mapping("award_amount").unwrap().currency.as_deref(),
        Some("CAD")
    );
}

#[test]
fn complex_field_country_literal_is_recognized() {
    let config = Config::from_yaml_str(FULL_CONFIG).expect("valid config");
    let members = config.complex_fields.get("members").expect("members spec");
    assert_eq!(members.role_field, "role");
    assert_eq!(
        members.fields.country,
        Some(CountrySource::Literal("NL".to_string()))
    );
}

#[test]
fn embedded_related_works_mode_is_selected() {
    let config = Config::from_yaml_str(FULL_CONFIG).expect("valid config");
    match config.related_works.as_ref().expect("related works config") {
        RelatedWorksConfig::Embedded(embedded) => {
            assert_eq!(embedded.embedded_field, "products");
            assert!(embedded.filter_pattern.is_some());
        }
        RelatedWorksConfig::ExternalJoin(_) => panic!("expected embedded mode"),
    }
}

#[test]
fn external_join_mode_is_selected_by_join_key() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: award_id
related_works_config:
  join_key: award_id
  grant_join_field: award_id
"#,
    )
    .expect("valid config");
    match config.related_works.as_ref().expect("related works config") {
        RelatedWorksConfig::ExternalJoin(join) => {
            assert_eq!(join.join_key, "award_id");
            assert_eq!(join.relationship_type, "isFinancedBy");
        }
        RelatedWorksConfig::Embedded(_) => panic!("expected external join mode"),
    }
}

#[test]
fn unknown_transform_is_rejected_at_load() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  doi:
    transform: upcase
    source_field: ApplicationID
"#,
    )
    .expect_err("unknown transform");
    assert!(matches!(error, ConfigError::UnknownTransform { .. }));
}

#[test]
fn construct_doi_requires_prefix() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  doi:
    transform: construct_doi
    source_field: ApplicationID
"#,
    )
    .expect_err("missing prefix");
    assert!(matches!(
        error,
        ConfigError::MissingOption {
            option: "prefix",
            ..
        }
    ));
}

#[test]
fn undeclared_complex_field_is_rejected() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  investigators:
    source_field: "_complex:members"
"#,
    )
    .expect_err("undeclared complex field");
    assert!(matches!(error, ConfigError::UndeclaredComplexField { .. }));
}

#[test]
fn related_works_without_join_keys_is_rejected() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
related_works_config:
  relationship_type: finances
"#,
    )
    .expect_err("missing join keys");
    assert!(matches!(
        error,
        ConfigError::MissingJoinKey {
            section: "related_works_config"
        }
    ));
}

#[test]
fn coapplicants_require_both_join_fields() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
coapplicants_config:
  join_key: ApplicationID
"#,
    )
    .expect_err("missing grant_join_field");
    assert!(matches!(error, ConfigError::MissingJoinKey { .. }));
}

#[test]
fn invalid_filter_pattern_is_fatal() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    source_field: ApplicationID
related_works_config:
  embedded_field: products
  filter_pattern: "["
"#,
    )
    .expect_err("bad regex");
    assert!(matches!(error, ConfigError::InvalidFilterPattern { .. }));
}

#[test]
fn missing_required_section_fails() {
    let error = Config::from_yaml_str(
        r#"
namespace_values: {}
field_mappings: {}
"#,
    )
    .expect_err("missing header section");
    assert!(matches!(error, ConfigError::Yaml(_)));
}

#[test]
fn numeric_static_values_render_as_text() {
    let config = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award_amount:
    static_value: 50000
"#,
    )
    .expect("valid config");
    match &config.mapping("award_amount").unwrap().rule {
        MappingRule::Static { value } => assert_eq!(value, "50000"),
        other => panic!("expected static rule, got {other:?}"),
    }
}

#[test]
fn mapping_without_strategy_is_rejected() {
    let error = Config::from_yaml_str(
        r#"
header_static_values: {}
namespace_values: {}
field_mappings:
  award-number:
    required: true
"#,
    )
    .expect_err("no strategy");
    assert!(matches!(error, ConfigError::InvalidRule { .. }));
}
