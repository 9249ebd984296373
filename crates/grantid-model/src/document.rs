#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Role of a person on a grant. Every grant carries at most one
/// `LeadInvestigator`; assembly demotes additional candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    LeadInvestigator,
    #[default]
    Investigator,
}

impl PersonRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeadInvestigator => "lead_investigator",
            Self::Investigator => "investigator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub institution: String,
    /// Two-letter country code when known.
    pub country: Option<String>,
}

/// One investigator or co-applicant. Given and family name are independently
/// optional: a source with only half of a split name still yields a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub role: PersonRole,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub affiliation: Option<Affiliation>,
    pub orcid: Option<String>,
}

impl Person {
    /// True when nothing identifying was extracted.
    pub fn is_empty(&self) -> bool {
        self.given_name.is_none()
            && self.family_name.is_none()
            && self.affiliation.is_none()
            && self.orcid.is_none()
    }
}

/// Identifier of a related work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelatedWorkId {
    Doi(String),
    Uri(String),
}

impl RelatedWorkId {
    pub fn identifier_type(&self) -> &'static str {
        match self {
            Self::Doi(_) => "doi",
            Self::Uri(_) => "uri",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Doi(value) | Self::Uri(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedWork {
    pub relationship_type: String,
    pub identifier: RelatedWorkId,
}

/// Funder identification: a ROR id, or a funder name and/or Funder Registry
/// DOI when no ROR is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunderId {
    Ror(String),
    Named {
        name: Option<String>,
        id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funding {
    pub funding_type: String,
    pub funder: Option<FunderId>,
    pub scheme: Option<String>,
}

impl Default for Funding {
    fn default() -> Self {
        Self {
            funding_type: "grant".to_string(),
            funder: None,
            scheme: None,
        }
    }
}

/// One funded project's assembled output entity, corresponding to one
/// `<grant>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Ordered, lead investigator first.
    pub investigators: Vec<Person>,
    pub award_amount: Option<String>,
    pub currency: Option<String>,
    pub funding: Funding,
    pub award_number: Option<String>,
    pub award_start_date: Option<String>,
    pub award_end_date: Option<String>,
    pub doi: Option<String>,
    pub resource: Option<String>,
    pub related_works: Vec<RelatedWork>,
}

impl Grant {
    pub fn lead_investigator(&self) -> Option<&Person> {
        self.investigators
            .iter()
            .find(|person| person.role == PersonRole::LeadInvestigator)
    }
}

/// Batch header emitted once per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHead {
    pub batch_id: String,
    pub timestamp: String,
    pub depositor_name: String,
    pub depositor_email: String,
    pub registrant: String,
}

/// Namespace and schema-location values stamped onto the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespaces {
    pub xmlns: String,
    pub schema_location: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            xmlns: "http://www.crossref.org/grant_id/0.2.0".to_string(),
            schema_location: "http://www.crossref.org/grant_id/0.2.0 \
                              http://www.crossref.org/schemas/grant_id0.2.0.xsd"
                .to_string(),
        }
    }
}

/// The complete output document handed to the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub head: DocumentHead,
    pub namespaces: Namespaces,
    pub grants: Vec<Grant>,
}
