//! Co-applicant resolution over a one-to-one joined source.

use std::collections::BTreeMap;

use grantid_map::{CoapplicantsConfig, TransformSpec};
use grantid_model::{Affiliation, Person, PersonRole, RawRecord};
use grantid_transform::split_name;

use crate::complex::resolve_country;

/// One-to-one index over the co-applicant source. Duplicate join keys
/// resolve to the last-seen record.
pub type CoapplicantIndex = BTreeMap<String, RawRecord>;

pub fn build_coapplicant_index(
    records: &[RawRecord],
    config: &CoapplicantsConfig,
) -> CoapplicantIndex {
    let mut index = CoapplicantIndex::new();
    for record in records {
        if let Some(key) = record.get_str(&config.join_key) {
            index.insert(key, record.clone());
        }
    }
    index
}

/// Look up a grant's co-applicant and render it as an additional
/// investigator. A join miss yields nothing; it is not an error.
pub fn resolve_coapplicant(
    record: &RawRecord,
    config: &CoapplicantsConfig,
    index: &CoapplicantIndex,
) -> Option<Person> {
    let join_value = record.get_str(&config.grant_join_field)?;
    let secondary = index.get(&join_value)?;

    let mut person = Person {
        role: PersonRole::Investigator,
        ..Default::default()
    };
    if let Some(raw_name) = config
        .name_field
        .as_deref()
        .and_then(|field| secondary.get_str(field))
    {
        match &config.name_transform {
            Some(TransformSpec::SplitName { separator }) => {
                let split = split_name(&raw_name, separator);
                person.family_name = split.family_name;
                person.given_name = split.given_name;
            }
            // An unsplit name column is taken as the family name.
            _ => person.family_name = Some(raw_name),
        }
    }
    if let Some(institution) = config
        .institution_field
        .as_deref()
        .and_then(|field| secondary.get_str(field))
    {
        let country = config
            .country_field
            .as_deref()
            .and_then(|field| secondary.get_str(field))
            .as_deref()
            .and_then(resolve_country);
        person.affiliation = Some(Affiliation {
            institution,
            country,
        });
    }

    if person.is_empty() { None } else { Some(person) }
}
