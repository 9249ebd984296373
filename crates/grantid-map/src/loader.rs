//! Configuration loading and validation.
//!
//! The YAML surface is deserialized into the shapes in [`crate::raw`] and
//! then validated into the closed types in [`crate::types`]. All strategy
//! and option errors are raised here, before the first record is touched.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use grantid_model::Namespaces;

use crate::error::ConfigError;
use crate::raw::{
    RawCoapplicantsConfig, RawComplexField, RawConfig, RawFieldMapping, RawPersonName,
    RawRelatedWorksConfig,
};
use crate::types::{
    CoapplicantsConfig, ComplexFieldMap, ComplexFieldSpec, Config, CountrySource, EmbeddedConfig,
    EngineOptions, ExternalJoinConfig, FieldMapping, HeaderStatics, LeadPersonSpec, MappingRule,
    PersonAffiliationSpec, PersonNameSpec, RelatedWorksConfig, TransformSpec,
};

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        debug!(
            path = %path.display(),
            mappings = config.field_mappings.len(),
            "loaded mapping configuration"
        );
        Ok(config)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(text)?;
        validate(raw)
    }
}

fn validate(raw: RawConfig) -> Result<Config, ConfigError> {
    let complex_fields = validate_complex_fields(raw.complex_fields);

    let mut field_mappings = Vec::with_capacity(raw.field_mappings.len());
    for (key, value) in &raw.field_mappings {
        let name = key.as_str().ok_or_else(|| ConfigError::InvalidRule {
            field: format!("{key:?}"),
            reason: "mapping name must be a string".to_string(),
        })?;
        let raw_mapping: RawFieldMapping = serde_yaml::from_value(value.clone())?;
        let rule = validate_rule(name, &raw_mapping, &complex_fields)?;
        field_mappings.push(FieldMapping {
            name: name.to_string(),
            rule,
            currency: raw_mapping.currency,
        });
    }

    let defaults = Namespaces::default();
    let namespace_values = Namespaces {
        xmlns: raw.namespace_values.xmlns.unwrap_or(defaults.xmlns),
        schema_location: raw
            .namespace_values
            .schema_location
            .unwrap_or(defaults.schema_location),
    };

    Ok(Config {
        header_static_values: HeaderStatics {
            doi_batch_id: raw.header_static_values.doi_batch_id,
            depositor_name: raw.header_static_values.depositor_name,
            depositor_email: raw.header_static_values.depositor_email,
            registrant: raw.header_static_values.registrant,
        },
        namespace_values,
        field_mappings,
        complex_fields,
        related_works: raw
            .related_works_config
            .map(validate_related_works)
            .transpose()?,
        coapplicants: raw
            .coapplicants_config
            .map(validate_coapplicants)
            .transpose()?,
        options: EngineOptions {
            json_root_path: raw.options.json_root_path,
        },
    })
}

fn validate_complex_fields(
    raw: BTreeMap<String, RawComplexField>,
) -> BTreeMap<String, ComplexFieldSpec> {
    raw.into_iter()
        .map(|(key, spec)| {
            let country = spec.fields.country.map(|value| {
                if let Some(code) = value.strip_prefix("_literal:") {
                    CountrySource::Literal(code.to_string())
                } else {
                    CountrySource::MemberField(value)
                }
            });
            let validated = ComplexFieldSpec {
                source: spec.source,
                priority_roles: spec.priority_roles,
                role_field: spec.role_field,
                fields: ComplexFieldMap {
                    first_name: spec.fields.first_name,
                    last_name: spec.fields.last_name,
                    organisation: spec.fields.organisation,
                    orcid: spec.fields.orcid,
                    country,
                },
            };
            (key, validated)
        })
        .collect()
}

/// Which keys are present on a mapping entry decides its strategy:
/// `static_value`, then `transform`, then special `source_field` prefixes
/// (`_literal:` / `_complex:`), then `person_name`, then a plain
/// `source_field`, then `concatenate`.
fn validate_rule(
    name: &str,
    raw: &RawFieldMapping,
    complex_fields: &BTreeMap<String, ComplexFieldSpec>,
) -> Result<MappingRule, ConfigError> {
    if let Some(value) = &raw.static_value {
        return Ok(MappingRule::Static {
            value: render_static(name, value)?,
        });
    }

    if let Some(transform_name) = &raw.transform {
        let transform = validate_transform(name, transform_name, raw)?;
        let source_field = raw
            .source_field
            .clone()
            .ok_or_else(|| ConfigError::InvalidRule {
                field: name.to_string(),
                reason: format!("transform `{transform_name}` requires a source_field"),
            })?;
        return Ok(MappingRule::Transform {
            transform,
            source_field,
        });
    }

    if let Some(source_field) = &raw.source_field {
        if let Some(rest) = source_field.strip_prefix("_literal:") {
            return Ok(MappingRule::Static {
                value: rest.to_string(),
            });
        }
        if let Some(key) = source_field.strip_prefix("_complex:") {
            if !complex_fields.contains_key(key) {
                return Err(ConfigError::UndeclaredComplexField {
                    field: name.to_string(),
                    key: key.to_string(),
                });
            }
            return Ok(MappingRule::Complex {
                key: key.to_string(),
            });
        }
    }

    if let Some(person_name) = &raw.person_name {
        return Ok(MappingRule::LeadPerson(validate_lead_person(
            name,
            person_name,
            raw,
        )?));
    }

    if let Some(source_field) = &raw.source_field {
        return Ok(MappingRule::Direct {
            source_field: source_field.clone(),
            default: raw.default.clone(),
            required: raw.required.unwrap_or(false),
        });
    }

    if let Some(fields) = &raw.concatenate {
        return Ok(MappingRule::Concatenate {
            source_fields: fields.clone(),
            separator: raw.separator.clone().unwrap_or_else(|| " ".to_string()),
        });
    }

    Err(ConfigError::InvalidRule {
        field: name.to_string(),
        reason: "no mapping strategy (expected source_field, static_value, transform, \
                 person_name, or concatenate)"
            .to_string(),
    })
}

fn render_static(name: &str, value: &serde_yaml::Value) -> Result<String, ConfigError> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConfigError::InvalidRule {
            field: name.to_string(),
            reason: "static_value must be a scalar".to_string(),
        }),
    }
}

fn validate_transform(
    field: &str,
    name: &str,
    raw: &RawFieldMapping,
) -> Result<TransformSpec, ConfigError> {
    match name {
        "split_name" => Ok(TransformSpec::SplitName {
            separator: raw.separator.clone().unwrap_or_else(|| ",".to_string()),
        }),
        "construct_doi" => Ok(TransformSpec::ConstructDoi {
            prefix: raw.prefix.clone().ok_or(ConfigError::MissingOption {
                field: field.to_string(),
                transform: "construct_doi",
                option: "prefix",
            })?,
        }),
        "construct_url" => Ok(TransformSpec::ConstructUrl {
            prefix: raw.prefix.clone().ok_or(ConfigError::MissingOption {
                field: field.to_string(),
                transform: "construct_url",
                option: "prefix",
            })?,
        }),
        "format_date" => Ok(TransformSpec::FormatDate {
            input_format: raw.input_format.clone(),
            output_format: raw
                .output_format
                .clone()
                .unwrap_or_else(|| "%Y-%m-%d".to_string()),
        }),
        other => Err(ConfigError::UnknownTransform {
            field: field.to_string(),
            name: other.to_string(),
        }),
    }
}

fn validate_lead_person(
    field: &str,
    person_name: &RawPersonName,
    raw: &RawFieldMapping,
) -> Result<LeadPersonSpec, ConfigError> {
    match person_name.transform.as_deref() {
        Some("split_name") => {}
        Some(other) => {
            return Err(ConfigError::UnknownTransform {
                field: format!("{field}.person_name"),
                name: other.to_string(),
            });
        }
        None => {
            return Err(ConfigError::InvalidRule {
                field: field.to_string(),
                reason: "person_name requires transform split_name".to_string(),
            });
        }
    }
    let source_field = person_name
        .source_field
        .clone()
        .ok_or(ConfigError::MissingOption {
            field: field.to_string(),
            transform: "split_name",
            option: "source_field",
        })?;
    let affiliation = raw
        .affiliation
        .as_ref()
        .map(|aff| {
            let source_field = aff
                .source_field
                .clone()
                .ok_or_else(|| ConfigError::InvalidRule {
                    field: field.to_string(),
                    reason: "affiliation requires a source_field".to_string(),
                })?;
            Ok(PersonAffiliationSpec {
                source_field,
                country_field: aff.country_field.clone(),
            })
        })
        .transpose()?;
    Ok(LeadPersonSpec {
        name: PersonNameSpec {
            source_field,
            separator: person_name
                .separator
                .clone()
                .unwrap_or_else(|| ",".to_string()),
        },
        affiliation,
    })
}

fn validate_related_works(raw: RawRelatedWorksConfig) -> Result<RelatedWorksConfig, ConfigError> {
    if let Some(embedded_field) = raw.embedded_field {
        let filter_pattern = match raw.filter_pattern {
            Some(pattern) => Some(Regex::new(&pattern).map_err(|source| {
                ConfigError::InvalidFilterPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?),
            None => None,
        };
        return Ok(RelatedWorksConfig::Embedded(EmbeddedConfig {
            embedded_field,
            doi_field: raw
                .doi_field
                .unwrap_or_else(|| "url_open_access".to_string()),
            filter_pattern,
            relationship_type: raw
                .relationship_type
                .unwrap_or_else(|| "finances".to_string()),
        }));
    }
    if let Some(join_key) = raw.join_key {
        return Ok(RelatedWorksConfig::ExternalJoin(ExternalJoinConfig {
            join_key,
            grant_join_field: raw.grant_join_field,
            relationship_type: raw
                .relationship_type
                .unwrap_or_else(|| "isFinancedBy".to_string()),
        }));
    }
    Err(ConfigError::MissingJoinKey {
        section: "related_works_config",
    })
}

fn validate_coapplicants(raw: RawCoapplicantsConfig) -> Result<CoapplicantsConfig, ConfigError> {
    let join_key = raw.join_key.ok_or(ConfigError::MissingJoinKey {
        section: "coapplicants_config",
    })?;
    let grant_join_field = raw.grant_join_field.ok_or(ConfigError::MissingJoinKey {
        section: "coapplicants_config",
    })?;
    let name_transform = match raw.name_transform.as_deref() {
        None => None,
        Some("split_name") => Some(TransformSpec::SplitName {
            separator: raw.name_separator.unwrap_or_else(|| ",".to_string()),
        }),
        Some(other) => {
            return Err(ConfigError::UnknownTransform {
                field: "coapplicants_config.name_transform".to_string(),
                name: other.to_string(),
            });
        }
    };
    Ok(CoapplicantsConfig {
        join_key,
        grant_join_field,
        name_field: raw.name_field,
        name_transform,
        institution_field: raw.institution_field,
        country_field: raw.country_field,
    })
}
