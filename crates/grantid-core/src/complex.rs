//! Priority-role selection over nested candidate collections.

use serde_json::Value;

use grantid_map::{ComplexFieldSpec, CountrySource};
use grantid_model::{Affiliation, Person, PersonRole, RawRecord, scalar_to_string};
use grantid_transform::{country_code, normalize_orcid};

/// Outcome of resolving a nested candidate collection: the chosen lead, if
/// any, and the remaining members as ordinary investigators in array order.
#[derive(Debug, Clone, Default)]
pub struct ComplexSelection {
    pub lead: Option<Person>,
    pub others: Vec<Person>,
}

/// Resolve a record's nested member collection into investigators.
pub fn extract_investigators(record: &RawRecord, spec: &ComplexFieldSpec) -> ComplexSelection {
    let Some(members) = record.get_array(&spec.source) else {
        return ComplexSelection::default();
    };
    let lead_index = select_lead_index(members, spec);
    let lead =
        lead_index.map(|idx| person_from_member(&members[idx], spec, PersonRole::LeadInvestigator));
    let others = members
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != lead_index)
        .map(|(_, member)| person_from_member(member, spec, PersonRole::Investigator))
        .filter(|person| !person.is_empty())
        .collect();
    ComplexSelection { lead, others }
}

/// Role priority is the tie-break, not array order: the first declared role
/// with any match wins, and within a role the first array entry is taken.
/// A non-empty collection with no role match falls back to its first entry.
fn select_lead_index(members: &[Value], spec: &ComplexFieldSpec) -> Option<usize> {
    for role in &spec.priority_roles {
        let hit = members
            .iter()
            .position(|member| member_role(member, &spec.role_field) == Some(role.as_str()));
        if hit.is_some() {
            return hit;
        }
    }
    if members.is_empty() { None } else { Some(0) }
}

fn member_role<'a>(member: &'a Value, role_field: &str) -> Option<&'a str> {
    member.get(role_field)?.as_str()
}

fn person_from_member(member: &Value, spec: &ComplexFieldSpec, role: PersonRole) -> Person {
    let fields = &spec.fields;
    let mut person = Person {
        role,
        ..Default::default()
    };
    person.given_name = fields
        .first_name
        .as_deref()
        .and_then(|key| member_str(member, key));
    person.family_name = fields
        .last_name
        .as_deref()
        .and_then(|key| member_str(member, key));
    if let Some(organisation) = fields
        .organisation
        .as_deref()
        .and_then(|key| member_str(member, key))
    {
        // Multi-valued organisation cells separate entries with "||"; the
        // first entry is the primary affiliation.
        let primary = organisation.split("||").next().unwrap_or_default().trim();
        if !primary.is_empty() {
            let country = match &fields.country {
                Some(CountrySource::Literal(code)) => Some(code.clone()),
                Some(CountrySource::MemberField(key)) => member_str(member, key)
                    .as_deref()
                    .and_then(resolve_country),
                None => None,
            };
            person.affiliation = Some(Affiliation {
                institution: primary.to_string(),
                country,
            });
        }
    }
    person.orcid = fields
        .orcid
        .as_deref()
        .and_then(|key| member_str(member, key))
        .as_deref()
        .and_then(normalize_orcid);
    person
}

fn member_str(member: &Value, key: &str) -> Option<String> {
    scalar_to_string(member.get(key)?)
}

/// Resolve a country value to a two-letter code: known names through the
/// lookup table, bare two-letter codes passed through uppercased.
pub(crate) fn resolve_country(value: &str) -> Option<String> {
    if let Some(code) = country_code(value) {
        return Some(code.to_string());
    }
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}
