//! Validated configuration types.
//!
//! Everything here is produced by the loader after validation: transform
//! names are resolved to closed enum variants, complex references are
//! checked against declarations, and join configurations carry their
//! required key fields. Record processing never sees a raw string-keyed
//! strategy choice.

use std::collections::BTreeMap;

use regex::Regex;

use grantid_model::Namespaces;

/// One output field and the rule that produces its value, in declaration
/// order.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    pub name: String,
    pub rule: MappingRule,
    /// Currency attribute for amount fields.
    pub currency: Option<String>,
}

/// The mapping strategy for one output field.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingRule {
    /// Copy a source field's scalar value. An absent source yields an absent
    /// output element unless `required` is set.
    Direct {
        source_field: String,
        default: Option<String>,
        required: bool,
    },
    /// Emit a fixed value regardless of the record.
    Static { value: String },
    /// Apply a transform to a source field's value.
    Transform {
        transform: TransformSpec,
        source_field: String,
    },
    /// Join several source fields' non-empty values with a separator.
    Concatenate {
        source_fields: Vec<String>,
        separator: String,
    },
    /// Resolve a nested candidate collection via a declared complex field.
    Complex { key: String },
    /// Build the lead investigator from flat source columns.
    LeadPerson(LeadPersonSpec),
}

/// A named transform plus its validated options. Unknown names are rejected
/// when the configuration is loaded, not when records are processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformSpec {
    SplitName {
        separator: String,
    },
    ConstructDoi {
        prefix: String,
    },
    ConstructUrl {
        prefix: String,
    },
    FormatDate {
        input_format: Option<String>,
        output_format: String,
    },
}

impl TransformSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SplitName { .. } => "split_name",
            Self::ConstructDoi { .. } => "construct_doi",
            Self::ConstructUrl { .. } => "construct_url",
            Self::FormatDate { .. } => "format_date",
        }
    }
}

/// Lead-investigator extraction from flat (tabular) source fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadPersonSpec {
    pub name: PersonNameSpec,
    pub affiliation: Option<PersonAffiliationSpec>,
}

/// Name splitting for a flat person field. Only `split_name` is meaningful
/// here; the loader rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNameSpec {
    pub source_field: String,
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonAffiliationSpec {
    pub source_field: String,
    pub country_field: Option<String>,
}

/// Where a complex sub-field's value comes from: a key on the selected
/// nested entity, or a literal supplied in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountrySource {
    Literal(String),
    MemberField(String),
}

/// Sub-field extraction map for a chosen nested entity. Unmapped keys on
/// the entity are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexFieldMap {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organisation: Option<String>,
    pub orcid: Option<String>,
    pub country: Option<CountrySource>,
}

/// Declaration of a nested candidate collection and how to pick one entity
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexFieldSpec {
    /// Nested array field on the raw record (dotted path).
    pub source: String,
    /// Role strings tried in order; the first role with any match wins.
    pub priority_roles: Vec<String>,
    /// Key holding the role on each nested entity.
    pub role_field: String,
    pub fields: ComplexFieldMap,
}

/// Related-works resolution; the two modes are mutually exclusive and
/// selected by which keys the configuration carries.
#[derive(Debug, Clone)]
pub enum RelatedWorksConfig {
    ExternalJoin(ExternalJoinConfig),
    Embedded(EmbeddedConfig),
}

#[derive(Debug, Clone)]
pub struct ExternalJoinConfig {
    /// Join key field in the secondary source.
    pub join_key: String,
    /// Field on the primary record matched against the join key. Falls back
    /// to the assembled award number when unset.
    pub grant_join_field: Option<String>,
    pub relationship_type: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddedConfig {
    /// Nested array field on the primary record.
    pub embedded_field: String,
    /// Key holding the DOI (or DOI URL) on each nested entry.
    pub doi_field: String,
    /// Entries are included only when the DOI field matches.
    pub filter_pattern: Option<Regex>,
    pub relationship_type: String,
}

/// Co-applicant join configuration.
#[derive(Debug, Clone)]
pub struct CoapplicantsConfig {
    pub join_key: String,
    pub grant_join_field: String,
    pub name_field: Option<String>,
    pub name_transform: Option<TransformSpec>,
    pub institution_field: Option<String>,
    pub country_field: Option<String>,
}

/// Static header values merged into every output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStatics {
    pub doi_batch_id: Option<String>,
    pub depositor_name: Option<String>,
    pub depositor_email: Option<String>,
    pub registrant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Dotted path to the record array inside a hierarchical source.
    pub json_root_path: Option<String>,
}

/// The validated configuration handed to the engine.
#[derive(Debug, Clone)]
pub struct Config {
    pub header_static_values: HeaderStatics,
    pub namespace_values: Namespaces,
    pub field_mappings: Vec<FieldMapping>,
    pub complex_fields: BTreeMap<String, ComplexFieldSpec>,
    pub related_works: Option<RelatedWorksConfig>,
    pub coapplicants: Option<CoapplicantsConfig>,
    pub options: EngineOptions,
}

impl Config {
    pub fn mapping(&self, name: &str) -> Option<&FieldMapping> {
        self.field_mappings.iter().find(|m| m.name == name)
    }
}
