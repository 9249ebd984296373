//! Pure value transformations for grant field mapping.
//!
//! Every function here is a total, side-effect-free mapping from a raw
//! source value (plus per-field options) to an output value or absence:
//!
//! - **name**: family/given splitting for combined name columns
//! - **identifier**: DOI/URL construction and normalization, ORCID repair
//! - **datetime**: date re-rendering between strftime formats
//! - **country**: country-name to ISO code lookup
//!
//! Absence in, absence out: no transform invents a partial identifier or a
//! placeholder name.

pub mod country;
pub mod datetime;
pub mod identifier;
pub mod name;

pub use country::country_code;
pub use datetime::{DateError, format_date};
pub use identifier::{
    construct_doi, construct_url, extract_doi_from_url, normalize_doi, normalize_orcid,
};
pub use name::{SplitName, split_name};
