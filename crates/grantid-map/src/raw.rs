//! Serde shapes for the YAML configuration surface.
//!
//! These structs mirror the file as written; validation into the closed
//! types in [`crate::types`] happens in the loader. Unknown keys are
//! ignored throughout, matching the documented option contract.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub header_static_values: RawHeaderStatics,
    pub namespace_values: RawNamespaces,
    /// Kept as a YAML mapping so declaration order survives into the
    /// validated rule list.
    pub field_mappings: serde_yaml::Mapping,
    #[serde(default)]
    pub complex_fields: BTreeMap<String, RawComplexField>,
    #[serde(default)]
    pub related_works_config: Option<RawRelatedWorksConfig>,
    #[serde(default)]
    pub coapplicants_config: Option<RawCoapplicantsConfig>,
    #[serde(default)]
    pub options: RawOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHeaderStatics {
    pub doi_batch_id: Option<String>,
    pub depositor_name: Option<String>,
    pub depositor_email: Option<String>,
    pub registrant: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNamespaces {
    pub xmlns: Option<String>,
    #[serde(rename = "xsi:schemaLocation")]
    pub schema_location: Option<String>,
}

/// One `field_mappings` entry. Which keys are present decides the mapping
/// strategy; the loader enforces the precedence.
#[derive(Debug, Default, Deserialize)]
pub struct RawFieldMapping {
    pub source_field: Option<String>,
    pub static_value: Option<serde_yaml::Value>,
    pub default: Option<String>,
    pub required: Option<bool>,
    pub transform: Option<String>,
    pub separator: Option<String>,
    pub prefix: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub concatenate: Option<Vec<String>>,
    pub currency: Option<String>,
    pub person_name: Option<RawPersonName>,
    pub affiliation: Option<RawPersonAffiliation>,
}

#[derive(Debug, Deserialize)]
pub struct RawPersonName {
    pub transform: Option<String>,
    pub source_field: Option<String>,
    pub separator: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPersonAffiliation {
    pub source_field: Option<String>,
    pub country_field: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawComplexField {
    pub source: String,
    #[serde(default)]
    pub priority_roles: Vec<String>,
    #[serde(default = "default_role_field")]
    pub role_field: String,
    #[serde(default)]
    pub fields: RawComplexFieldMap,
}

fn default_role_field() -> String {
    "role".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct RawComplexFieldMap {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organisation: Option<String>,
    pub orcid: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawRelatedWorksConfig {
    pub join_key: Option<String>,
    pub grant_join_field: Option<String>,
    pub relationship_type: Option<String>,
    pub embedded_field: Option<String>,
    pub doi_field: Option<String>,
    pub filter_pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCoapplicantsConfig {
    pub join_key: Option<String>,
    pub grant_join_field: Option<String>,
    pub name_field: Option<String>,
    pub name_transform: Option<String>,
    pub name_separator: Option<String>,
    pub institution_field: Option<String>,
    pub country_field: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOptions {
    pub json_root_path: Option<String>,
}
