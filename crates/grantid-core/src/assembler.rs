//! Per-record grant assembly: rule dispatch in declaration order, then
//! joined related works and co-applicants.

use thiserror::Error;
use tracing::{debug, warn};

use grantid_map::{Config, FieldMapping, LeadPersonSpec, MappingRule, TransformSpec};
use grantid_model::{Affiliation, FieldWarning, FunderId, Grant, Person, PersonRole, RawRecord};
use grantid_transform::{construct_doi, construct_url, format_date, split_name};

use crate::coapplicants::{CoapplicantIndex, resolve_coapplicant};
use crate::complex::{extract_investigators, resolve_country};
use crate::related_works::{RelatedWorksIndex, resolve_related_works};

/// Fatal, per-record assembly failures. The batch skips the record with a
/// warning and continues; these never abort the run.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("required field `{field}` has no value (source `{source_field}`)")]
    MissingRequired { field: String, source_field: String },
    #[error("record has no fields")]
    EmptyRecord,
}

/// Join indexes built once before the first record is assembled. Read-only
/// for the rest of the run.
#[derive(Debug, Default)]
pub struct JoinIndexes {
    pub related_works: Option<RelatedWorksIndex>,
    pub coapplicants: Option<CoapplicantIndex>,
}

/// One assembled grant plus the per-field warnings raised on the way.
#[derive(Debug)]
pub struct AssemblyOutput {
    pub grant: Grant,
    pub warnings: Vec<FieldWarning>,
}

/// Assemble one grant from a raw record.
///
/// Output fields are resolved in declaration order; per-field failures omit
/// the field and continue. Related works and co-applicants are appended
/// after the mapped fields so joined investigators always follow the
/// record's own.
pub fn assemble_grant(
    record: &RawRecord,
    config: &Config,
    indexes: &JoinIndexes,
) -> Result<AssemblyOutput, RecordError> {
    if record.is_empty() {
        return Err(RecordError::EmptyRecord);
    }

    let mut grant = Grant::default();
    let mut warnings = Vec::new();

    for mapping in &config.field_mappings {
        apply_mapping(record, config, mapping, &mut grant, &mut warnings)?;
    }

    if let Some(rw_config) = &config.related_works {
        grant.related_works = resolve_related_works(
            record,
            rw_config,
            indexes.related_works.as_ref(),
            grant.award_number.as_deref(),
        );
    }
    if let (Some(co_config), Some(index)) = (&config.coapplicants, indexes.coapplicants.as_ref()) {
        if let Some(person) = resolve_coapplicant(record, co_config, index) {
            grant.investigators.push(person);
        }
    }

    demote_extra_leads(&mut grant);
    Ok(AssemblyOutput { grant, warnings })
}

/// At most one lead investigator per grant: the first keeps the role, any
/// later qualifying person is demoted.
fn demote_extra_leads(grant: &mut Grant) {
    let mut seen_lead = false;
    for person in &mut grant.investigators {
        if person.role == PersonRole::LeadInvestigator {
            if seen_lead {
                person.role = PersonRole::Investigator;
            } else {
                seen_lead = true;
            }
        }
    }
}

fn apply_mapping(
    record: &RawRecord,
    config: &Config,
    mapping: &FieldMapping,
    grant: &mut Grant,
    warnings: &mut Vec<FieldWarning>,
) -> Result<(), RecordError> {
    match &mapping.rule {
        MappingRule::Complex { key } => {
            // Declared complex keys are validated at load time; a miss here
            // would mean the config and its validation disagree.
            if let Some(spec) = config.complex_fields.get(key) {
                let selection = extract_investigators(record, spec);
                if let Some(lead) = selection.lead {
                    grant.investigators.push(lead);
                }
                grant.investigators.extend(selection.others);
            }
            Ok(())
        }
        MappingRule::LeadPerson(spec) => {
            if let Some(person) = lead_person(record, spec) {
                grant.investigators.push(person);
            }
            Ok(())
        }
        _ => {
            let value = resolve_scalar(record, mapping, warnings)?;
            assign_field(grant, mapping, value);
            Ok(())
        }
    }
}

fn resolve_scalar(
    record: &RawRecord,
    mapping: &FieldMapping,
    warnings: &mut Vec<FieldWarning>,
) -> Result<Option<String>, RecordError> {
    match &mapping.rule {
        MappingRule::Direct {
            source_field,
            default,
            required,
        } => {
            let value = record.get_str(source_field).or_else(|| default.clone());
            if value.is_none() && *required {
                return Err(RecordError::MissingRequired {
                    field: mapping.name.clone(),
                    source_field: source_field.clone(),
                });
            }
            Ok(value)
        }
        MappingRule::Static { value } => Ok(Some(value.clone())),
        MappingRule::Transform {
            transform,
            source_field,
        } => Ok(apply_transform(
            record,
            mapping,
            transform,
            source_field,
            warnings,
        )),
        MappingRule::Concatenate {
            source_fields,
            separator,
        } => {
            let parts: Vec<String> = source_fields
                .iter()
                .filter_map(|field| record.get_str(field))
                .collect();
            if parts.is_empty() {
                Ok(None)
            } else {
                Ok(Some(parts.join(separator)))
            }
        }
        MappingRule::Complex { .. } | MappingRule::LeadPerson(_) => Ok(None),
    }
}

fn apply_transform(
    record: &RawRecord,
    mapping: &FieldMapping,
    transform: &TransformSpec,
    source_field: &str,
    warnings: &mut Vec<FieldWarning>,
) -> Option<String> {
    let value = record.get_str(source_field)?;
    match transform {
        TransformSpec::ConstructDoi { prefix } => construct_doi(&value, prefix),
        TransformSpec::ConstructUrl { prefix } => construct_url(&value, prefix),
        TransformSpec::FormatDate {
            input_format,
            output_format,
        } => match format_date(&value, input_format.as_deref(), output_format) {
            Ok(rendered) => Some(rendered),
            Err(error) => {
                warn!(
                    record = record.number(),
                    field = %mapping.name,
                    %error,
                    "omitting field"
                );
                warnings.push(FieldWarning {
                    record_number: record.number(),
                    field: mapping.name.clone(),
                    message: error.to_string(),
                });
                None
            }
        },
        TransformSpec::SplitName { separator } => {
            // A scalar output cannot carry both halves; keep the given name,
            // matching the no-separator contract.
            let split = split_name(&value, separator);
            split.given_name.or(split.family_name)
        }
    }
}

/// Route a resolved scalar into its slot on the grant. Output names follow
/// the registration schema's element names.
fn assign_field(grant: &mut Grant, mapping: &FieldMapping, value: Option<String>) {
    match mapping.name.as_str() {
        "project-title" => grant.title = value,
        "description" => grant.description = value,
        "award_amount" => {
            if value.is_some() {
                grant.currency = mapping.currency.clone();
            }
            grant.award_amount = value;
        }
        "funding_type" => {
            if let Some(value) = value {
                grant.funding.funding_type = value;
            }
        }
        "funder_ror" => {
            if let Some(value) = value {
                grant.funding.funder = Some(FunderId::Ror(value));
            }
        }
        "funder_name" => set_funder_name(grant, value),
        "funder_id" => set_funder_id(grant, value),
        "funding_scheme" => grant.funding.scheme = value,
        "award-number" => grant.award_number = value,
        "award-start-date" => grant.award_start_date = value,
        "award-end-date" => grant.award_end_date = value,
        "doi" => grant.doi = value,
        "resource" => grant.resource = value,
        other => debug!(field = other, "ignoring unrecognized output field"),
    }
}

/// ROR identification wins over name/id funder identification.
fn set_funder_name(grant: &mut Grant, value: Option<String>) {
    let Some(value) = value else { return };
    match &mut grant.funding.funder {
        Some(FunderId::Ror(_)) => {}
        Some(FunderId::Named { name, .. }) => *name = Some(value),
        funder @ None => {
            *funder = Some(FunderId::Named {
                name: Some(value),
                id: None,
            });
        }
    }
}

fn set_funder_id(grant: &mut Grant, value: Option<String>) {
    let Some(value) = value else { return };
    match &mut grant.funding.funder {
        Some(FunderId::Ror(_)) => {}
        Some(FunderId::Named { id, .. }) => *id = Some(value),
        funder @ None => {
            *funder = Some(FunderId::Named {
                name: None,
                id: Some(value),
            });
        }
    }
}

fn lead_person(record: &RawRecord, spec: &LeadPersonSpec) -> Option<Person> {
    let mut person = Person {
        role: PersonRole::LeadInvestigator,
        ..Default::default()
    };
    if let Some(raw_name) = record.get_str(&spec.name.source_field) {
        let split = split_name(&raw_name, &spec.name.separator);
        person.family_name = split.family_name;
        person.given_name = split.given_name;
    }
    if let Some(affiliation) = &spec.affiliation {
        if let Some(institution) = record.get_str(&affiliation.source_field) {
            let country = affiliation
                .country_field
                .as_deref()
                .and_then(|field| record.get_str(field))
                .as_deref()
                .and_then(resolve_country);
            person.affiliation = Some(Affiliation {
                institution,
                country,
            });
        }
    }
    if person.is_empty() { None } else { Some(person) }
}
